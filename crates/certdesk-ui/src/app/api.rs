//! API client context for sharing a singleton client instance.
//!
//! # Design
//! - Create exactly one API client per app boot.
//! - Carry the boot config next to it so views read settings from one context.

use crate::core::config::BootConfig;
use crate::services::api::ApiClient;
use std::rc::Rc;

/// Shared API client and boot settings.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    /// Singleton API client instance.
    pub(crate) client: Rc<ApiClient>,
    /// Settings read from the mount element.
    pub(crate) config: Rc<BootConfig>,
}

impl ApiCtx {
    pub(crate) fn new(config: BootConfig) -> Self {
        let config = Rc::new(config);
        Self {
            client: Rc::new(ApiClient::new(Rc::clone(&config))),
            config,
        }
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}
