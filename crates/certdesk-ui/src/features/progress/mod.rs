//! Batch progress tracking shared by the dashboard and the upload page.

pub mod state;

#[cfg(target_arch = "wasm32")]
mod poller;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;

#[cfg(target_arch = "wasm32")]
pub(crate) use view::BatchTracker;
