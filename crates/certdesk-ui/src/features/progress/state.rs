//! Batch progress polling session.
//!
//! # Design
//! - One session per batch identifier; the wasm poller owns the timer and asks
//!   the session whether a tick may issue a request.
//! - A session leaves `Polling` exactly once: on the first terminal status, on a
//!   transport failure, or on explicit cancellation. Nothing is emitted afterwards.

use crate::core::logic::upload_progress_path;
use crate::core::store::Severity;
use certdesk_api_models::{BatchProgress, BatchStatus};

/// Delay between progress requests.
pub const POLL_INTERVAL_MS: u32 = 2_000;
/// Delay before leaving the upload page after a successful batch.
pub const REDIRECT_DELAY_MS: u32 = 2_000;
/// Delay before the upload form is reset after a failed batch.
pub const RESET_DELAY_MS: u32 = 3_000;

/// Caption left on the bar after polling stops on a transport failure.
pub const HALTED_TEXT: &str = "Progress updates stopped";

/// Which page hosts the tracker; controls wording and follow-up actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackerStyle {
    /// Compact tracker on the dashboard.
    Dashboard,
    /// Full-width tracker on the upload page.
    Upload,
}

/// Fill colour of the progress bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarTone {
    /// Still running.
    Active,
    /// Finished successfully.
    Success,
    /// Finished with a failure.
    Danger,
}

impl BarTone {
    /// Bar modifier class.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Active => "progress-bar-animated",
            Self::Success => "bg-success",
            Self::Danger => "bg-danger",
        }
    }
}

/// What the progress bar should show after a response.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressFrame {
    /// Fill percentage in `0.0..=100.0`.
    pub percent: f64,
    /// Caption under the bar.
    pub text: String,
    /// Fill colour.
    pub tone: BarTone,
}

impl ProgressFrame {
    /// Initial frame before the first response arrives.
    #[must_use]
    pub fn waiting() -> Self {
        Self {
            percent: 0.0,
            text: "Waiting for progress...".to_string(),
            tone: BarTone::Active,
        }
    }

    /// Frame shown once polling halted: same fill, fixed caption, no animation.
    #[must_use]
    pub fn halted(&self) -> Self {
        Self {
            percent: self.percent,
            text: HALTED_TEXT.to_string(),
            tone: BarTone::Danger,
        }
    }

    /// Inline `width` declaration for the bar element.
    #[must_use]
    pub fn width_style(&self) -> String {
        format!("width: {}%", self.percent)
    }
}

/// Action the upload page schedules after a batch finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowUp {
    /// Open the completion page after the delay.
    Redirect {
        /// Milliseconds to wait.
        delay_ms: u32,
    },
    /// Return to an empty upload form after the delay.
    ResetForm {
        /// Milliseconds to wait.
        delay_ms: u32,
    },
}

/// Result handed to the completion handler, produced once per session.
#[derive(Clone, Debug, PartialEq)]
pub struct Completion {
    /// Terminal status observed.
    pub status: BatchStatus,
    /// Final bar state.
    pub frame: ProgressFrame,
    /// Severity of the completion banner.
    pub severity: Severity,
    /// Completion banner text.
    pub message: String,
    /// Optional delayed navigation.
    pub follow_up: Option<FollowUp>,
}

/// Outcome of feeding one response into a session.
#[derive(Clone, Debug, PartialEq)]
pub enum PollStep {
    /// Batch still running; keep polling.
    Progress(ProgressFrame),
    /// Batch reached a terminal status; the timer must stop.
    Finished(Completion),
}

/// Lifecycle of a polling session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Timer running.
    Polling,
    /// Terminal status observed.
    Finished(BatchStatus),
    /// Stopped by a transport failure.
    Halted,
    /// Stopped by teardown.
    Cancelled,
}

/// Polling state for one batch identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressSession {
    batch_id: String,
    style: TrackerStyle,
    state: SessionState,
    in_flight: bool,
}

impl ProgressSession {
    /// Start tracking a batch.
    #[must_use]
    pub fn new(batch_id: impl Into<String>, style: TrackerStyle) -> Self {
        Self {
            batch_id: batch_id.into(),
            style,
            state: SessionState::Polling,
            in_flight: false,
        }
    }

    /// Tracked batch identifier.
    #[must_use]
    pub fn batch_id(&self) -> &str {
        &self.batch_id
    }

    /// Endpoint polled for this batch.
    #[must_use]
    pub fn path(&self) -> String {
        upload_progress_path(&self.batch_id)
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the timer should still be running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Polling)
    }

    /// Claim the next request slot. Returns `false` when the session stopped or a
    /// request is still outstanding, in which case the tick is skipped.
    pub fn begin_request(&mut self) -> bool {
        if !self.is_active() || self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Feed a response. Returns `None` once the session has stopped.
    pub fn observe(&mut self, progress: &BatchProgress) -> Option<PollStep> {
        self.in_flight = false;
        if !self.is_active() {
            return None;
        }
        if progress.status.is_terminal() {
            self.state = SessionState::Finished(progress.status);
            return Some(PollStep::Finished(self.completion(progress)));
        }
        Some(PollStep::Progress(self.frame(progress)))
    }

    /// Record a transport failure. Returns `true` when this stopped the session.
    pub fn transport_failed(&mut self) -> bool {
        self.in_flight = false;
        if !self.is_active() {
            return false;
        }
        self.state = SessionState::Halted;
        true
    }

    /// Stop polling on teardown.
    pub fn cancel(&mut self) {
        if self.is_active() {
            self.state = SessionState::Cancelled;
        }
    }

    fn frame(&self, progress: &BatchProgress) -> ProgressFrame {
        let text = match self.style {
            TrackerStyle::Dashboard => format!(
                "{}/{} processed",
                progress.processed_records, progress.total_records
            ),
            TrackerStyle::Upload => upload_message(progress),
        };
        ProgressFrame {
            percent: clamp_percent(progress.progress_percentage),
            text,
            tone: BarTone::Active,
        }
    }

    fn completion(&self, progress: &BatchProgress) -> Completion {
        let succeeded = progress.status == BatchStatus::Completed;
        let mut frame = self.frame(progress);
        frame.tone = if succeeded {
            BarTone::Success
        } else {
            BarTone::Danger
        };
        let follow_up = match self.style {
            TrackerStyle::Dashboard => {
                frame.percent = 100.0;
                None
            }
            TrackerStyle::Upload if succeeded => {
                frame.percent = 100.0;
                frame.text = "Processing completed successfully!".to_string();
                Some(FollowUp::Redirect {
                    delay_ms: REDIRECT_DELAY_MS,
                })
            }
            TrackerStyle::Upload => {
                frame.text = "Processing failed. Please try again.".to_string();
                Some(FollowUp::ResetForm {
                    delay_ms: RESET_DELAY_MS,
                })
            }
        };
        Completion {
            status: progress.status,
            frame,
            severity: if succeeded {
                Severity::Success
            } else {
                Severity::Error
            },
            message: completion_message(progress),
            follow_up,
        }
    }
}

/// Caption used by the upload page for a response.
#[must_use]
pub fn upload_message(progress: &BatchProgress) -> String {
    match progress.status {
        BatchStatus::Completed => format!(
            "Completed: {} successful, {} failed",
            progress.successful_records, progress.failed_records
        ),
        BatchStatus::Failed => "Processing failed".to_string(),
        BatchStatus::Pending | BatchStatus::Processing => format!(
            "Processing: {}/{} records",
            progress.processed_records, progress.total_records
        ),
    }
}

/// Banner text shown when a batch finishes.
#[must_use]
pub fn completion_message(progress: &BatchProgress) -> String {
    format!(
        "Batch processing {}: {} successful, {} failed",
        progress.status.as_str(),
        progress.successful_records,
        progress.failed_records
    )
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(status: BatchStatus, processed: u64, total: u64, pct: f64) -> BatchProgress {
        BatchProgress {
            status,
            progress_percentage: pct,
            processed_records: processed,
            total_records: total,
            successful_records: processed.saturating_sub(2),
            failed_records: processed.min(2),
        }
    }

    fn completed_batch() -> BatchProgress {
        BatchProgress {
            status: BatchStatus::Completed,
            progress_percentage: 100.0,
            processed_records: 50,
            total_records: 50,
            successful_records: 48,
            failed_records: 2,
        }
    }

    #[test]
    fn running_batch_updates_bar_and_caption() {
        let mut session = ProgressSession::new("b-1", TrackerStyle::Dashboard);
        assert!(session.begin_request());
        let step = session.observe(&progress(BatchStatus::Processing, 10, 50, 20.0));
        assert_eq!(
            step,
            Some(PollStep::Progress(ProgressFrame {
                percent: 20.0,
                text: "10/50 processed".to_string(),
                tone: BarTone::Active,
            }))
        );
        assert!(session.is_active());
    }

    #[test]
    fn completed_batch_finishes_with_success_banner() {
        let mut session = ProgressSession::new("b-1", TrackerStyle::Dashboard);
        assert!(session.begin_request());
        let Some(PollStep::Finished(done)) = session.observe(&completed_batch()) else {
            panic!("expected completion");
        };
        assert!((done.frame.percent - 100.0).abs() < f64::EPSILON);
        assert_eq!(done.frame.tone, BarTone::Success);
        assert_eq!(done.severity, Severity::Success);
        assert_eq!(
            done.message,
            "Batch processing completed: 48 successful, 2 failed"
        );
        assert_eq!(done.follow_up, None);
        assert_eq!(
            session.state(),
            SessionState::Finished(BatchStatus::Completed)
        );
    }

    #[test]
    fn termination_happens_exactly_once() {
        let mut session = ProgressSession::new("b-1", TrackerStyle::Upload);
        let mut finished = 0;
        let responses = [
            progress(BatchStatus::Pending, 0, 10, 0.0),
            progress(BatchStatus::Processing, 5, 10, 50.0),
            progress(BatchStatus::Failed, 6, 10, 60.0),
            progress(BatchStatus::Completed, 10, 10, 100.0),
            progress(BatchStatus::Failed, 10, 10, 100.0),
        ];
        let mut requests = 0;
        for response in &responses {
            if !session.begin_request() {
                continue;
            }
            requests += 1;
            if let Some(PollStep::Finished(_)) = session.observe(response) {
                finished += 1;
            }
        }
        assert_eq!(finished, 1);
        assert_eq!(requests, 3);
        assert!(!session.begin_request());
        assert_eq!(session.observe(&completed_batch()), None);
    }

    #[test]
    fn outstanding_request_skips_tick() {
        let mut session = ProgressSession::new("b-1", TrackerStyle::Dashboard);
        assert!(session.begin_request());
        assert!(!session.begin_request());
        session.observe(&progress(BatchStatus::Processing, 1, 2, 50.0));
        assert!(session.begin_request());
    }

    #[test]
    fn transport_failure_halts_without_completion() {
        let mut session = ProgressSession::new("b-1", TrackerStyle::Upload);
        assert!(session.begin_request());
        assert!(session.transport_failed());
        assert_eq!(session.state(), SessionState::Halted);
        assert!(!session.transport_failed());
        assert!(!session.begin_request());
        let frame = ProgressFrame::waiting().halted();
        assert_eq!(frame.text, HALTED_TEXT);
        assert_eq!(frame.tone, BarTone::Danger);
        assert_eq!(session.observe(&completed_batch()), None);
    }

    #[test]
    fn cancel_is_final() {
        let mut session = ProgressSession::new("b-1", TrackerStyle::Dashboard);
        session.cancel();
        assert_eq!(session.state(), SessionState::Cancelled);
        assert!(!session.begin_request());
        session.cancel();
        assert_eq!(session.state(), SessionState::Cancelled);
    }

    #[test]
    fn upload_style_schedules_follow_ups() {
        let mut ok = ProgressSession::new("b-1", TrackerStyle::Upload);
        ok.begin_request();
        let Some(PollStep::Finished(done)) = ok.observe(&completed_batch()) else {
            panic!("expected completion");
        };
        assert_eq!(done.frame.text, "Processing completed successfully!");
        assert_eq!(
            done.follow_up,
            Some(FollowUp::Redirect {
                delay_ms: REDIRECT_DELAY_MS
            })
        );

        let mut failed = ProgressSession::new("b-2", TrackerStyle::Upload);
        failed.begin_request();
        let Some(PollStep::Finished(done)) =
            failed.observe(&progress(BatchStatus::Failed, 4, 10, 40.0))
        else {
            panic!("expected completion");
        };
        assert_eq!(done.frame.tone, BarTone::Danger);
        assert!((done.frame.percent - 40.0).abs() < f64::EPSILON);
        assert_eq!(done.frame.text, "Processing failed. Please try again.");
        assert_eq!(done.severity, Severity::Error);
        assert_eq!(
            done.follow_up,
            Some(FollowUp::ResetForm {
                delay_ms: RESET_DELAY_MS
            })
        );
    }

    #[test]
    fn upload_captions_follow_status() {
        assert_eq!(
            upload_message(&progress(BatchStatus::Processing, 3, 9, 33.0)),
            "Processing: 3/9 records"
        );
        assert_eq!(
            upload_message(&completed_batch()),
            "Completed: 48 successful, 2 failed"
        );
        assert_eq!(
            upload_message(&progress(BatchStatus::Failed, 0, 9, 0.0)),
            "Processing failed"
        );
    }

    #[test]
    fn percentages_are_clamped() {
        let mut session = ProgressSession::new("b-1", TrackerStyle::Dashboard);
        session.begin_request();
        let Some(PollStep::Progress(frame)) =
            session.observe(&progress(BatchStatus::Processing, 1, 1, 140.0))
        else {
            panic!("expected progress");
        };
        assert!((frame.percent - 100.0).abs() < f64::EPSILON);
        assert_eq!(frame.width_style(), "width: 100%");
        assert!((clamp_percent(-3.0)).abs() < f64::EPSILON);
        assert!((clamp_percent(f64::NAN)).abs() < f64::EPSILON);
    }

    #[test]
    fn path_uses_progress_endpoint() {
        let session = ProgressSession::new("b 1", TrackerStyle::Dashboard);
        assert_eq!(session.batch_id(), "b 1");
        assert_eq!(session.path(), "/api/upload_progress/b%201");
    }
}
