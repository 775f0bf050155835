//! Dashboard feature slice: stat cards, charts and tracked batches.

pub mod charts;
pub mod state;

#[cfg(target_arch = "wasm32")]
mod chart_panel;
#[cfg(target_arch = "wasm32")]
mod entrance;
#[cfg(target_arch = "wasm32")]
mod poller;
#[cfg(target_arch = "wasm32")]
mod stat_cards;
#[cfg(target_arch = "wasm32")]
mod toolbar;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;

#[cfg(target_arch = "wasm32")]
pub(crate) use view::DashboardPage;
