//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Notifications carry their own placement so the dashboard and the upload
//!   form can render the same list in different outlets.

use crate::core::theme::ThemeMode;
use certdesk_api_models::DashboardStats;
use yewdux::store::Store;

/// Milliseconds a notification stays visible before it removes itself.
pub const NOTIFICATION_TTL_MS: u32 = 5_000;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Store, Default)]
pub struct AppStore {
    /// Transient banners.
    pub notifications: NotificationsState,
    /// Latest dashboard payload and page theme.
    pub dashboard: DashboardSlice,
}

/// Dashboard data shared between the poller and the views.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DashboardSlice {
    /// Last successful statistics response.
    pub stats: Option<DashboardStats>,
    /// Theme observed on the host document.
    pub theme: ThemeMode,
}

/// Severity of a notification banner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Operation succeeded.
    Success,
    /// Operation failed or input was rejected.
    Error,
    /// Neutral information.
    Info,
    /// Attention needed but nothing failed.
    Warning,
}

impl Severity {
    /// Alert modifier class (`error` renders as `danger`).
    #[must_use]
    pub const fn alert_class(self) -> &'static str {
        match self {
            Self::Success => "alert-success",
            Self::Error => "alert-danger",
            Self::Info => "alert-info",
            Self::Warning => "alert-warning",
        }
    }

    /// Icon class shown in front of the message.
    #[must_use]
    pub const fn icon_class(self) -> &'static str {
        match self {
            Self::Success => "fa-check-circle",
            Self::Error | Self::Warning => "fa-exclamation-triangle",
            Self::Info => "fa-info-circle",
        }
    }
}

/// Where a notification is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Fixed to the top-right corner of the viewport.
    Floating,
    /// Directly above the upload form.
    Inline,
}

/// A dismissible banner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Monotonic identifier.
    pub id: u64,
    /// Visual severity.
    pub severity: Severity,
    /// Target outlet.
    pub placement: Placement,
    /// Text shown to the user.
    pub message: String,
}

/// Ordered list of visible notifications. No queueing: new banners stack.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct NotificationsState {
    next_id: u64,
    /// Visible banners, oldest first.
    pub items: Vec<Notification>,
}

impl NotificationsState {
    /// Append a banner and return its identifier.
    pub fn push(
        &mut self,
        severity: Severity,
        placement: Placement,
        message: impl Into<String>,
    ) -> u64 {
        self.next_id = self.next_id.wrapping_add(1);
        let id = self.next_id;
        self.items.push(Notification {
            id,
            severity,
            placement,
            message: message.into(),
        });
        id
    }

    /// Remove a banner; returns `false` when it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Banners for one outlet, oldest first.
    #[must_use]
    pub fn for_placement(&self, placement: Placement) -> Vec<Notification> {
        self.items
            .iter()
            .filter(|item| item.placement == placement)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_labels_map_to_alert_classes() {
        assert_eq!(Severity::Success.alert_class(), "alert-success");
        assert_eq!(Severity::Error.alert_class(), "alert-danger");
        assert_eq!(Severity::Warning.alert_class(), "alert-warning");
        assert_eq!(Severity::Info.alert_class(), "alert-info");
        assert_eq!(Severity::Success.icon_class(), "fa-check-circle");
        assert_eq!(Severity::Error.icon_class(), "fa-exclamation-triangle");
    }

    #[test]
    fn notifications_stack_and_dismiss_once() {
        let mut state = NotificationsState::default();
        let first = state.push(Severity::Success, Placement::Floating, "one");
        let second = state.push(Severity::Error, Placement::Inline, "two");
        let third = state.push(Severity::Info, Placement::Floating, "three");
        assert_ne!(first, second);
        assert_eq!(state.items.len(), 3);

        let floating = state.for_placement(Placement::Floating);
        assert_eq!(
            floating.iter().map(|n| n.id).collect::<Vec<_>>(),
            vec![first, third]
        );

        assert!(state.dismiss(second));
        assert!(!state.dismiss(second));
        assert!(state.for_placement(Placement::Inline).is_empty());
    }

    #[test]
    fn ids_keep_increasing_after_dismissal() {
        let mut state = NotificationsState::default();
        let first = state.push(Severity::Info, Placement::Floating, "a");
        state.dismiss(first);
        let next = state.push(Severity::Info, Placement::Floating, "b");
        assert!(next > first);
    }
}
