//! Boot configuration read from the host page.
//!
//! # Design
//! - The server-rendered page owns environment details; the app only reads
//!   `data-*` attributes from its mount element once at start-up.
//! - Parsing is a pure function over an attribute lookup so it can be tested natively.

/// Attribute carrying the API origin (e.g. `https://admin.example.org`).
pub const ATTR_API_BASE: &str = "data-api-base";
/// Attribute carrying the upload form action.
pub const ATTR_UPLOAD_ACTION: &str = "data-upload-action";
/// Attribute carrying the post-upload redirect target.
pub const ATTR_REDIRECT: &str = "data-redirect";
/// Attribute carrying comma-separated batch identifiers to track on the dashboard.
pub const ATTR_BATCH_IDS: &str = "data-batch-ids";

/// Default form action for multipart uploads.
pub const DEFAULT_UPLOAD_ACTION: &str = "/upload";
/// Default page to visit once a batch completes.
pub const DEFAULT_REDIRECT: &str = "/admin/certificates";

/// Runtime settings for the app shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BootConfig {
    /// Origin prefixed to every API path; empty means same-origin relative paths.
    pub api_base: String,
    /// Target of the upload `POST`.
    pub upload_action: String,
    /// Location opened after a batch completes successfully.
    pub completion_redirect: String,
    /// Batches whose progress is shown on the dashboard.
    pub tracked_batches: Vec<String>,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            upload_action: DEFAULT_UPLOAD_ACTION.to_string(),
            completion_redirect: DEFAULT_REDIRECT.to_string(),
            tracked_batches: Vec::new(),
        }
    }
}

impl BootConfig {
    /// Build the config from an attribute lookup, falling back to defaults for
    /// missing or blank values.
    #[must_use]
    pub fn from_attributes<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();
        Self {
            api_base: read(ATTR_API_BASE)
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            upload_action: read(ATTR_UPLOAD_ACTION).unwrap_or(defaults.upload_action),
            completion_redirect: read(ATTR_REDIRECT).unwrap_or(defaults.completion_redirect),
            tracked_batches: read(ATTR_BATCH_IDS)
                .map(|raw| parse_batch_ids(&raw))
                .unwrap_or_default(),
        }
    }

    /// Join an API path onto the configured base.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

/// Split a comma-separated list of batch identifiers, dropping blanks and duplicates.
#[must_use]
pub fn parse_batch_ids(raw: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for id in raw.split(',').map(str::trim).filter(|id| !id.is_empty()) {
        if !ids.iter().any(|known| known == id) {
            ids.push(id.to_string());
        }
    }
    ids
}
