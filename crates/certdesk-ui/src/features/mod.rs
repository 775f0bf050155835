//! Feature slices.

pub mod dashboard;
pub mod progress;
pub mod upload;
