//! Dashboard stat cards, counter animation and report export.

use crate::core::export::{ExportError, encode_rows};
use certdesk_api_models::DashboardStats;
use csv::QuoteStyle;

/// Delay between statistics polls.
pub const STATS_POLL_INTERVAL_MS: u32 = 30_000;
/// How long the refresh button stays disabled after a click.
pub const REFRESH_COOLDOWN_MS: u32 = 2_000;
/// Total duration of a counter animation.
pub const COUNTER_DURATION_MS: u32 = 1_000;
/// Frame period of a counter animation.
pub const COUNTER_FRAME_MS: u32 = 16;
/// Stagger between card entrance animations.
pub const CARD_STAGGER_MS: u32 = 100;
/// Quiet period before charts are resized after the window changes size.
pub const RESIZE_DEBOUNCE_MS: u32 = 250;
/// Visible fraction that re-triggers a stat card animation.
pub const STAT_VISIBILITY_THRESHOLD: f64 = 0.5;
/// File name of the exported report.
pub const REPORT_FILE_NAME: &str = "dashboard-report.csv";

/// Transition shared by every dashboard card.
pub const CARD_TRANSITION: &str = "transition: all 0.6s ease;";
/// Inline style of a card that has not entered yet.
pub const CARD_HIDDEN_STYLE: &str = "opacity: 0; transform: translateY(20px);";
/// Inline style for a hovered stat card.
pub const CARD_RAISED_STYLE: &str =
    "transform: translateY(-5px); box-shadow: 0 8px 25px rgba(0,0,0,0.15);";
/// Inline style for a resting stat card.
pub const CARD_RESTING_STYLE: &str =
    "transform: translateY(0); box-shadow: 0 2px 10px rgba(0,0,0,0.1);";

/// Metric shown by one stat card. Rendered as `data-stat="<key>"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatKind {
    /// Registered students.
    TotalStudents,
    /// Generated certificates.
    TotalCertificates,
    /// Delivered certificates.
    SentCertificates,
    /// Delivery success rate in percent.
    SuccessRate,
}

impl StatKind {
    /// Cards in display order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::TotalStudents,
            Self::TotalCertificates,
            Self::SentCertificates,
            Self::SuccessRate,
        ]
    }

    /// Stable key used for the data attribute and the report column.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::TotalStudents => "total_students",
            Self::TotalCertificates => "total_certificates",
            Self::SentCertificates => "sent_certificates",
            Self::SuccessRate => "success_rate",
        }
    }

    /// Card caption.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TotalStudents => "Total Students",
            Self::TotalCertificates => "Certificates Generated",
            Self::SentCertificates => "Certificates Sent",
            Self::SuccessRate => "Success Rate",
        }
    }

    /// Icon class for the card.
    #[must_use]
    pub const fn icon_class(self) -> &'static str {
        match self {
            Self::TotalStudents => "fa-users",
            Self::TotalCertificates => "fa-certificate",
            Self::SentCertificates => "fa-paper-plane",
            Self::SuccessRate => "fa-chart-line",
        }
    }

    /// Suffix rendered after the number.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::SuccessRate => "%",
            _ => "",
        }
    }

    /// Integer value of this metric in a statistics payload.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn value(self, stats: &DashboardStats) -> i64 {
        let count = |value: u64| i64::try_from(value).unwrap_or(i64::MAX);
        match self {
            Self::TotalStudents => count(stats.total_students),
            Self::TotalCertificates => count(stats.total_certificates),
            Self::SentCertificates => count(stats.sent_certificates),
            Self::SuccessRate => {
                if stats.success_rate.is_finite() {
                    stats.success_rate.floor() as i64
                } else {
                    0
                }
            }
        }
    }
}

/// Interpolates a counter from one integer to another in fixed frames.
///
/// Each frame advances by `(end - start) / (duration / frame)`; the displayed
/// value is the floor of the running value, and the final frame is clamped to
/// `end`, so the sequence never passes the target.
#[derive(Clone, Debug, PartialEq)]
pub struct CounterAnimation {
    current: f64,
    end: i64,
    increment: f64,
    done: bool,
}

impl CounterAnimation {
    /// Start an animation; `None` when there is nothing to animate.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(start: i64, end: i64) -> Option<Self> {
        if start == end {
            return None;
        }
        let steps = f64::from(COUNTER_DURATION_MS) / f64::from(COUNTER_FRAME_MS);
        Some(Self {
            current: start as f64,
            end,
            increment: (end as f64 - start as f64) / steps,
            done: false,
        })
    }

    /// Value the animation settles on.
    #[must_use]
    pub const fn target(&self) -> i64 {
        self.end
    }

    /// Advance one frame; `None` after the final frame.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn next_frame(&mut self) -> Option<i64> {
        if self.done {
            return None;
        }
        self.current += self.increment;
        let end = self.end as f64;
        let reached = (self.increment > 0.0 && self.current >= end)
            || (self.increment < 0.0 && self.current <= end);
        if reached {
            self.done = true;
            return Some(self.end);
        }
        Some(self.current.floor() as i64)
    }
}

impl Iterator for CounterAnimation {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame()
    }
}

/// Values of every stat in a payload, display order.
#[must_use]
pub fn stat_values(stats: Option<&DashboardStats>) -> Vec<(StatKind, i64)> {
    StatKind::all()
        .into_iter()
        .map(|kind| (kind, stats.map_or(0, |stats| kind.value(stats))))
        .collect()
}

/// Render the one-row report CSV (`timestamp` plus every stat key).
///
/// # Errors
/// Returns [`ExportError`] when CSV encoding fails.
pub fn report_csv(timestamp: &str, stats: Option<&DashboardStats>) -> Result<String, ExportError> {
    let values = stat_values(stats);
    let mut header = vec!["timestamp".to_string()];
    header.extend(values.iter().map(|(kind, _)| kind.key().to_string()));
    let mut row = vec![timestamp.to_string()];
    row.extend(values.iter().map(|(_, value)| value.to_string()));
    encode_rows([header, row], QuoteStyle::Necessary)
}

/// Filter selects shown in the dashboard toolbar: `(key, label, options)`.
pub const DASHBOARD_FILTERS: [(&str, &str, &[&str]); 2] = [
    (
        "status",
        "Status",
        &["all", "pending", "generated", "sent", "failed"],
    ),
    ("period", "Period", &["7d", "30d", "90d"]),
];

/// Console line emitted when a dashboard filter changes.
#[must_use]
pub fn filter_log_message(filter: &str, value: &str) -> String {
    format!("Applying filter: {filter} = {value}")
}

/// Entrance slot of the daily-generation chart card; the stat cards come first.
pub const GENERATION_CHART_SLOT: usize = StatKind::all().len();
/// Entrance slot of the status chart card.
pub const STATUS_CHART_SLOT: usize = GENERATION_CHART_SLOT + 1;
/// Entrance slot of the tracked-batches card.
pub const BATCH_CARD_SLOT: usize = STATUS_CHART_SLOT + 1;

/// Inline style of a dashboard card. `hovered` is `None` for cards without a hover lift.
#[must_use]
pub fn card_style(entered: bool, hovered: Option<bool>) -> String {
    if !entered {
        return format!("{CARD_TRANSITION} {CARD_HIDDEN_STYLE}");
    }
    let rest = match hovered {
        Some(true) => CARD_RAISED_STYLE,
        Some(false) => CARD_RESTING_STYLE,
        None => "transform: translateY(0);",
    };
    format!("{CARD_TRANSITION} opacity: 1; {rest}")
}

/// Entrance animation delay for the card at `index`.
#[must_use]
pub fn entrance_delay_ms(index: usize) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(CARD_STAGGER_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stats() -> DashboardStats {
        DashboardStats {
            total_students: 120,
            total_certificates: 45,
            sent_certificates: 40,
            success_rate: 89.0,
            ..DashboardStats::default()
        }
    }

    #[test]
    fn example_payload_maps_to_each_card() {
        let values = stat_values(Some(&sample_stats()));
        assert_eq!(
            values,
            vec![
                (StatKind::TotalStudents, 120),
                (StatKind::TotalCertificates, 45),
                (StatKind::SentCertificates, 40),
                (StatKind::SuccessRate, 89),
            ]
        );
        for (kind, value) in values {
            let last = CounterAnimation::new(0, value).unwrap().last();
            assert_eq!(last, Some(value), "{}", kind.key());
        }
    }

    #[test]
    fn missing_stats_read_as_zero() {
        assert!(stat_values(None).iter().all(|(_, value)| *value == 0));
    }

    #[test]
    fn fractional_rates_are_floored() {
        let stats = DashboardStats {
            success_rate: 88.9,
            ..DashboardStats::default()
        };
        assert_eq!(StatKind::SuccessRate.value(&stats), 88);
        let broken = DashboardStats {
            success_rate: f64::NAN,
            ..DashboardStats::default()
        };
        assert_eq!(StatKind::SuccessRate.value(&broken), 0);
    }

    #[test]
    fn equal_values_do_not_animate() {
        assert!(CounterAnimation::new(7, 7).is_none());
    }

    #[test]
    fn counters_end_exactly_on_target_without_overshoot() {
        let cases = [(0, 120), (120, 0), (-5, 5), (10, 11), (11, 10), (0, 1_000_003)];
        for (start, end) in cases {
            let frames: Vec<i64> = CounterAnimation::new(start, end).unwrap().collect();
            assert_eq!(frames.last().copied(), Some(end), "{start}->{end}");
            let (lo, hi) = if start < end { (start, end) } else { (end, start) };
            assert!(
                frames.iter().all(|v| (lo..=hi).contains(v)),
                "{start}->{end} left range"
            );
            let ordered = if start < end {
                frames.windows(2).all(|w| w[0] <= w[1])
            } else {
                frames.windows(2).all(|w| w[0] >= w[1])
            };
            assert!(ordered, "{start}->{end} not monotonic");
            assert!((62..=64).contains(&frames.len()), "{} frames", frames.len());
        }
    }

    #[test]
    fn finished_animation_stays_finished() {
        let mut animation = CounterAnimation::new(0, 3).unwrap();
        assert_eq!(animation.target(), 3);
        while animation.next_frame().is_some() {}
        assert_eq!(animation.next_frame(), None);
    }

    #[test]
    fn report_has_header_and_single_row() {
        let csv = report_csv("2024-01-15T10:00:00.000Z", Some(&sample_stats())).unwrap();
        assert_eq!(
            csv,
            "timestamp,total_students,total_certificates,sent_certificates,success_rate\n\
             2024-01-15T10:00:00.000Z,120,45,40,89"
        );
    }

    #[test]
    fn filter_messages_and_delays() {
        assert_eq!(
            filter_log_message("status", "sent"),
            "Applying filter: status = sent"
        );
        assert_eq!(entrance_delay_ms(0), 0);
        assert_eq!(entrance_delay_ms(3), 300);
    }

    #[test]
    fn every_card_gets_its_own_entrance_slot() {
        let stat_slots = 0..StatKind::all().len();
        for slot in [GENERATION_CHART_SLOT, STATUS_CHART_SLOT, BATCH_CARD_SLOT] {
            assert!(!stat_slots.contains(&slot));
        }
        assert_eq!(entrance_delay_ms(GENERATION_CHART_SLOT), 400);
        assert_eq!(entrance_delay_ms(STATUS_CHART_SLOT), 500);
        assert_eq!(entrance_delay_ms(BATCH_CARD_SLOT), 600);
    }

    #[test]
    fn cards_fade_in_and_only_stat_cards_lift() {
        let hidden = card_style(false, None);
        assert!(hidden.contains("opacity: 0") && hidden.contains("translateY(20px)"));
        assert_eq!(card_style(false, Some(true)), hidden);

        let chart = card_style(true, None);
        assert!(chart.contains("opacity: 1") && chart.contains("translateY(0)"));
        assert!(!chart.contains("box-shadow"));

        assert!(card_style(true, Some(true)).ends_with(CARD_RAISED_STYLE));
        assert!(card_style(true, Some(false)).ends_with(CARD_RESTING_STYLE));
    }
}
