//! Upload form state machine.
//!
//! The view wraps [`UploadForm`] in a Yew reducer; every transition is a pure
//! [`UploadForm::apply`] call so the form can be exercised without a browser.

use super::logic::{FilePreview, SIMULATION_CAP, SelectedFile, advance_simulation};

/// Submit button caption while idle.
pub const SUBMIT_IDLE_LABEL: &str = "Upload and Process";
/// Submit button caption while the request is outstanding.
pub const SUBMIT_BUSY_LABEL: &str = "Processing...";

/// Where the form is in its lifecycle.
#[derive(Clone, Debug, PartialEq)]
pub enum UploadPhase {
    /// No valid file selected.
    Empty,
    /// A valid file is selected and submission is enabled.
    Ready,
    /// Submit was pressed and the file is being checked; the form is locked.
    Validating,
    /// The upload request is outstanding.
    Submitting {
        /// Simulated progress in `0.0..=90.0`.
        progress: f64,
        /// Whether the simulated bar reached its cap.
        capped: bool,
    },
}

/// Events fed into the form.
#[derive(Clone, Debug, PartialEq)]
pub enum UploadAction {
    /// A drag entered the drop area.
    DragEnter,
    /// The drag left the drop area or was dropped.
    DragLeave,
    /// A file passed validation; the token identifies this selection.
    Select(u64, SelectedFile),
    /// Preview content for the selection with the given token.
    Preview(u64, FilePreview),
    /// The remove button was pressed or validation failed.
    Remove,
    /// Submit was pressed; lock the form while the file is checked.
    Validate,
    /// The check rejected the file; unlock the form.
    ValidationFailed,
    /// The check passed and the request is being sent.
    Submit,
    /// One simulated progress step with a jitter in `0.0..1.0`.
    SimulationTick(f64),
    /// Return to an empty form.
    Reset,
}

/// Upload form model.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadForm {
    /// Current valid selection.
    pub selected: Option<SelectedFile>,
    /// Preview for the current selection.
    pub preview: Option<FilePreview>,
    /// Whether a drag is hovering the drop area.
    pub dragging: bool,
    /// Current lifecycle phase.
    pub phase: UploadPhase,
    selection_token: u64,
}

impl Default for UploadForm {
    fn default() -> Self {
        Self {
            selected: None,
            preview: None,
            dragging: false,
            phase: UploadPhase::Empty,
            selection_token: 0,
        }
    }
}

impl UploadForm {
    /// Token of the current selection. Previews read asynchronously carry
    /// the token of their file so a late read for a replaced file is dropped.
    #[must_use]
    pub const fn selection_token(&self) -> u64 {
        self.selection_token
    }

    /// Whether the submit button is enabled.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        matches!(self.phase, UploadPhase::Ready)
    }

    /// Whether a request is outstanding.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.phase, UploadPhase::Submitting { .. })
    }

    /// Whether the selection is frozen (checking or sending).
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        matches!(
            self.phase,
            UploadPhase::Validating | UploadPhase::Submitting { .. }
        )
    }

    /// Submit button caption.
    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        if self.is_locked() {
            SUBMIT_BUSY_LABEL
        } else {
            SUBMIT_IDLE_LABEL
        }
    }

    /// Simulated progress while submitting.
    #[must_use]
    pub const fn simulated_progress(&self) -> Option<f64> {
        match self.phase {
            UploadPhase::Submitting { progress, .. } => Some(progress),
            _ => None,
        }
    }

    /// Whether the simulation timer should keep running.
    #[must_use]
    pub const fn simulation_running(&self) -> bool {
        matches!(self.phase, UploadPhase::Submitting { capped: false, .. })
    }

    /// Return the next state after `action`.
    #[must_use]
    pub fn apply(&self, action: UploadAction) -> Self {
        let mut next = self.clone();
        match action {
            UploadAction::DragEnter => next.dragging = true,
            UploadAction::DragLeave => next.dragging = false,
            UploadAction::Select(token, file) if !self.is_locked() => {
                next.selection_token = token;
                next.selected = Some(file);
                next.preview = None;
                next.dragging = false;
                next.phase = UploadPhase::Ready;
            }
            UploadAction::Preview(token, preview)
                if token == self.selection_token && self.selected.is_some() =>
            {
                next.preview = Some(preview);
            }
            UploadAction::Remove if !self.is_locked() => {
                next.selected = None;
                next.preview = None;
                next.dragging = false;
                next.phase = UploadPhase::Empty;
            }
            UploadAction::Validate if self.can_submit() => {
                next.phase = UploadPhase::Validating;
            }
            UploadAction::ValidationFailed if self.phase == UploadPhase::Validating => {
                next.phase = UploadPhase::Ready;
            }
            UploadAction::Submit if self.phase == UploadPhase::Validating => {
                next.phase = UploadPhase::Submitting {
                    progress: 0.0,
                    capped: false,
                };
            }
            UploadAction::SimulationTick(jitter) => {
                if let UploadPhase::Submitting {
                    progress,
                    capped: false,
                } = self.phase
                {
                    let (progress, capped) = advance_simulation(progress, jitter);
                    next.phase = UploadPhase::Submitting { progress, capped };
                }
            }
            UploadAction::Reset => next = Self::default(),
            UploadAction::Select(..)
            | UploadAction::Preview(..)
            | UploadAction::Remove
            | UploadAction::Validate
            | UploadAction::ValidationFailed
            | UploadAction::Submit => {}
        }
        next
    }
}

/// Width style for the simulated bar.
#[must_use]
pub fn simulated_width_style(progress: f64) -> String {
    format!("width: {}%", progress.clamp(0.0, SIMULATION_CAP))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::upload::logic::{FileMeta, validate_file};

    fn csv_file(name: &str) -> SelectedFile {
        validate_file(Some(FileMeta {
            name: name.to_string(),
            size: 64,
            media_type: "text/csv".to_string(),
        }))
        .unwrap()
    }

    #[test]
    fn submit_needs_a_valid_selection() {
        let form = UploadForm::default();
        assert!(!form.can_submit());
        assert_eq!(form.apply(UploadAction::Validate), form);
        assert_eq!(form.apply(UploadAction::Submit), form);

        let ready = form.apply(UploadAction::Select(1, csv_file("a.csv")));
        assert!(ready.can_submit());
        assert_eq!(ready.submit_label(), SUBMIT_IDLE_LABEL);
        assert_eq!(ready.apply(UploadAction::Submit), ready);

        let busy = ready
            .apply(UploadAction::Validate)
            .apply(UploadAction::Submit);
        assert!(busy.is_submitting());
        assert!(!busy.can_submit());
        assert_eq!(busy.submit_label(), "Processing...");
        assert_eq!(busy.simulated_progress(), Some(0.0));
    }

    #[test]
    fn stale_previews_are_dropped() {
        let form = UploadForm::default()
            .apply(UploadAction::Select(1, csv_file("a.csv")))
            .apply(UploadAction::Select(2, csv_file("b.csv")));
        let late = form.apply(UploadAction::Preview(1, FilePreview::from_csv("old")));
        assert_eq!(late.preview, None);

        let fresh = form.apply(UploadAction::Preview(2, FilePreview::from_csv("new")));
        assert_eq!(form.selection_token(), 2);
        assert_eq!(fresh.preview.unwrap().lines, vec!["new"]);
    }

    #[test]
    fn remove_clears_selection_and_preview() {
        let form = UploadForm::default()
            .apply(UploadAction::DragEnter)
            .apply(UploadAction::Select(7, csv_file("a.csv")));
        assert!(!form.dragging);
        let form = form.apply(UploadAction::Preview(7, FilePreview::spreadsheet()));
        let cleared = form.apply(UploadAction::Remove);
        assert_eq!(
            cleared.apply(UploadAction::Preview(7, FilePreview::spreadsheet())),
            cleared
        );
        assert_eq!(cleared.selected, None);
        assert_eq!(cleared.preview, None);
        assert_eq!(cleared.phase, UploadPhase::Empty);
    }

    #[test]
    fn selection_is_locked_while_submitting() {
        let busy = UploadForm::default()
            .apply(UploadAction::Select(1, csv_file("a.csv")))
            .apply(UploadAction::Validate)
            .apply(UploadAction::Submit);
        assert_eq!(busy.apply(UploadAction::Remove), busy);
        assert_eq!(busy.apply(UploadAction::Select(2, csv_file("b.csv"))), busy);
    }

    #[test]
    fn simulation_stops_at_cap() {
        let mut form = UploadForm::default()
            .apply(UploadAction::Select(1, csv_file("a.csv")))
            .apply(UploadAction::Validate)
            .apply(UploadAction::Submit);
        for _ in 0..20 {
            form = form.apply(UploadAction::SimulationTick(0.99));
        }
        assert_eq!(form.simulated_progress(), Some(SIMULATION_CAP));
        assert!(!form.simulation_running());
        assert_eq!(simulated_width_style(90.0), "width: 90%");
    }

    #[test]
    fn pending_check_locks_the_form() {
        let checking = UploadForm::default()
            .apply(UploadAction::Select(1, csv_file("a.csv")))
            .apply(UploadAction::Validate);
        assert_eq!(checking.phase, UploadPhase::Validating);
        assert!(!checking.can_submit());
        assert!(!checking.simulation_running());
        assert_eq!(checking.submit_label(), SUBMIT_BUSY_LABEL);
        assert_eq!(checking.apply(UploadAction::Validate), checking);
        assert_eq!(checking.apply(UploadAction::Remove), checking);
        assert_eq!(
            checking.apply(UploadAction::Select(2, csv_file("b.csv"))),
            checking
        );
    }

    #[test]
    fn rejected_check_unlocks_the_same_file() {
        let ready = UploadForm::default().apply(UploadAction::Select(1, csv_file("a.csv")));
        let unlocked = ready
            .apply(UploadAction::Validate)
            .apply(UploadAction::ValidationFailed);
        assert_eq!(unlocked, ready);
        assert_eq!(unlocked.apply(UploadAction::Submit), unlocked);
        assert_eq!(ready.apply(UploadAction::ValidationFailed), ready);
    }

    #[test]
    fn ticks_outside_submission_are_ignored() {
        let form = UploadForm::default();
        assert_eq!(form.apply(UploadAction::SimulationTick(0.5)), form);
    }

    #[test]
    fn reset_returns_to_empty_form() {
        let form = UploadForm::default()
            .apply(UploadAction::Select(1, csv_file("a.csv")))
            .apply(UploadAction::Validate)
            .apply(UploadAction::Submit)
            .apply(UploadAction::Reset);
        assert_eq!(form, UploadForm::default());
        assert!(!form.can_submit());
    }
}
