#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! Shared HTTP DTOs for the Certdesk admin API.
//!
//! Only the two JSON read contracts polled by the web UI live here. Decoding is
//! lenient to match the backend: absent counters read as zero and absent series
//! read as empty lists.
use serde::{Deserialize, Serialize};

/// Summary payload returned by `GET /api/dashboard_stats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    /// Number of registered students.
    #[serde(default)]
    pub total_students: u64,
    /// Number of generated certificates.
    #[serde(default)]
    pub total_certificates: u64,
    /// Number of certificates delivered by email.
    #[serde(default)]
    pub sent_certificates: u64,
    /// Delivery success rate in percent.
    #[serde(default)]
    pub success_rate: f64,
    /// Certificates generated per day, oldest first.
    #[serde(default)]
    pub daily_generation: Vec<DailyGeneration>,
    /// Certificate count per lifecycle status.
    #[serde(default)]
    pub status_distribution: Vec<StatusCount>,
}

/// One point of the daily generation series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyGeneration {
    /// Calendar day, usually `YYYY-MM-DD`.
    pub date: String,
    /// Certificates generated on that day.
    #[serde(default)]
    pub count: u64,
}

/// One slice of the status distribution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCount {
    /// Lower-case status label as stored by the backend.
    pub status: String,
    /// Certificates currently in that status.
    #[serde(default)]
    pub count: u64,
}

/// Processing state of a batch upload.
///
/// `completed_with_errors` is folded into [`BatchStatus::Completed`] and any
/// unrecognised label into [`BatchStatus::Processing`], so a tracker always
/// reaches a terminal state when the backend finishes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum BatchStatus {
    /// Accepted but not started.
    Pending,
    /// Rows are being processed.
    Processing,
    /// All rows were processed.
    Completed,
    /// The batch aborted.
    Failed,
}

impl BatchStatus {
    /// Whether no further progress updates are expected.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Wire label for the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl From<String> for BatchStatus {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "completed" | "completed_with_errors" => Self::Completed,
            "failed" => Self::Failed,
            _ => Self::Processing,
        }
    }
}

/// Progress payload returned by `GET /api/upload_progress/{batch_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchProgress {
    /// Current processing state.
    pub status: BatchStatus,
    /// Completion percentage reported by the backend.
    #[serde(default)]
    pub progress_percentage: f64,
    /// Rows handled so far.
    #[serde(default)]
    pub processed_records: u64,
    /// Rows in the uploaded file.
    #[serde(default)]
    pub total_records: u64,
    /// Rows that produced a student record.
    #[serde(default)]
    pub successful_records: u64,
    /// Rows that were rejected.
    #[serde(default)]
    pub failed_records: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_stats_defaults_missing_fields() {
        let stats: DashboardStats = serde_json::from_str(
            r#"{"total_students":120,"total_certificates":45,"sent_certificates":40,"success_rate":89}"#,
        )
        .unwrap();
        assert_eq!(stats.total_students, 120);
        assert_eq!(stats.total_certificates, 45);
        assert_eq!(stats.sent_certificates, 40);
        assert!((stats.success_rate - 89.0).abs() < f64::EPSILON);
        assert!(stats.daily_generation.is_empty());
        assert!(stats.status_distribution.is_empty());

        let empty: DashboardStats = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, DashboardStats::default());
    }

    #[test]
    fn dashboard_stats_decodes_series() {
        let stats: DashboardStats = serde_json::from_str(
            r#"{
                "daily_generation":[{"date":"2024-01-15","count":3},{"date":"2024-01-16","count":7}],
                "status_distribution":[{"status":"sent","count":40},{"status":"pending","count":5}]
            }"#,
        )
        .unwrap();
        assert_eq!(stats.daily_generation.len(), 2);
        assert_eq!(stats.daily_generation[1].count, 7);
        assert_eq!(stats.status_distribution[0].status, "sent");
    }

    #[test]
    fn batch_status_folds_backend_labels() {
        let decode = |raw: &str| -> BatchStatus {
            serde_json::from_str(&format!("\"{raw}\"")).unwrap()
        };
        assert_eq!(decode("pending"), BatchStatus::Pending);
        assert_eq!(decode("processing"), BatchStatus::Processing);
        assert_eq!(decode("completed"), BatchStatus::Completed);
        assert_eq!(decode("completed_with_errors"), BatchStatus::Completed);
        assert_eq!(decode("failed"), BatchStatus::Failed);
        assert_eq!(decode("queued"), BatchStatus::Processing);
    }

    #[test]
    fn batch_status_serializes_snake_case() {
        let json = serde_json::to_string(&BatchStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
        assert!(BatchStatus::Failed.is_terminal());
        assert!(!BatchStatus::Pending.is_terminal());
    }

    #[test]
    fn batch_progress_decodes_completed_example() {
        let progress: BatchProgress = serde_json::from_str(
            r#"{"status":"completed","progress_percentage":100,"processed_records":50,
                "total_records":50,"successful_records":48,"failed_records":2}"#,
        )
        .unwrap();
        assert_eq!(progress.status, BatchStatus::Completed);
        assert_eq!(progress.successful_records, 48);
        assert_eq!(progress.failed_records, 2);
    }
}
