//! Browser-facing services: REST client, charting bridge and DOM helpers.

pub(crate) mod api;
pub(crate) mod charts;
pub(crate) mod dom;
