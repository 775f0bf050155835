//! Start-up settings read from the host page.

use crate::core::config::BootConfig;
use gloo::console;
use gloo::utils::document;

/// Mount element id.
pub(crate) const ROOT_ID: &str = "root";

/// Read [`BootConfig`] from the `data-*` attributes of `#root`.
pub(crate) fn boot_config() -> BootConfig {
    let Some(root) = document().get_element_by_id(ROOT_ID) else {
        console::warn!("mount element missing; using default settings");
        return BootConfig::default();
    };
    BootConfig::from_attributes(|name| root.get_attribute(name))
}
