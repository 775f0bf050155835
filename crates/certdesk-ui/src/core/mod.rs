//! Core, DOM-free primitives and helpers for the Web UI.
pub mod config;
pub mod export;
pub mod logic;
pub mod store;
pub mod theme;
