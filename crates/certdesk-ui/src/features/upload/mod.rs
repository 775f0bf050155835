//! Upload feature slice: file validation, form state and the upload page.

pub mod logic;
pub mod state;

#[cfg(target_arch = "wasm32")]
mod dropzone;
#[cfg(target_arch = "wasm32")]
mod preview;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;

#[cfg(target_arch = "wasm32")]
pub(crate) use view::UploadPage;
