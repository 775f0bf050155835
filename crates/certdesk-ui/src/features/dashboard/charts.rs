//! Chart series and configuration handed to the external charting library.
//!
//! # Design
//! - Everything here is plain data (`serde_json::Value` and property paths); the
//!   wasm bridge in `services::charts` only copies it onto Chart.js objects.
//! - An empty series never replaces existing chart data.

use crate::core::logic::{capitalize_first, format_short_date};
use crate::core::theme::{ChartPalette, ThemeMode};
use certdesk_api_models::{DailyGeneration, DashboardStats, StatusCount};
use serde_json::{Value, json};

/// Which dashboard chart a canvas hosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Line chart of certificates generated per day.
    Generation,
    /// Doughnut chart of certificates per status.
    Status,
}

impl ChartKind {
    /// Canvas element id.
    #[must_use]
    pub const fn canvas_id(self) -> &'static str {
        match self {
            Self::Generation => "generationChart",
            Self::Status => "statusChart",
        }
    }

    /// Card heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Generation => "Daily Certificate Generation",
            Self::Status => "Certificate Status",
        }
    }

    const fn chart_type(self) -> &'static str {
        match self {
            Self::Generation => "line",
            Self::Status => "doughnut",
        }
    }

    /// Whether the chart has cartesian axes to recolour.
    #[must_use]
    pub const fn has_scales(self) -> bool {
        matches!(self, Self::Generation)
    }
}

/// Labels and values of a single-dataset chart.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChartSeries {
    /// Category or axis labels.
    pub labels: Vec<String>,
    /// One value per label.
    pub values: Vec<u64>,
}

impl ChartSeries {
    /// Whether there is nothing to plot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A property assignment on a Chart.js object, addressed by path.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartPatch {
    /// Property names from the root object.
    pub path: &'static [&'static str],
    /// Value to assign.
    pub value: Value,
}

impl ChartPatch {
    fn new(path: &'static [&'static str], value: impl Into<Value>) -> Self {
        Self {
            path,
            value: value.into(),
        }
    }
}

/// Daily series with short date labels; `None` when the payload is empty.
#[must_use]
pub fn generation_series(points: &[DailyGeneration]) -> Option<ChartSeries> {
    if points.is_empty() {
        return None;
    }
    Some(ChartSeries {
        labels: points.iter().map(|p| format_short_date(&p.date)).collect(),
        values: points.iter().map(|p| p.count).collect(),
    })
}

/// Status series with capitalised labels; `None` when the payload is empty.
#[must_use]
pub fn status_series(slices: &[StatusCount]) -> Option<ChartSeries> {
    if slices.is_empty() {
        return None;
    }
    Some(ChartSeries {
        labels: slices.iter().map(|s| capitalize_first(&s.status)).collect(),
        values: slices.iter().map(|s| s.count).collect(),
    })
}

/// Series a chart should show for a payload; `None` keeps the current data.
#[must_use]
pub fn series_for(kind: ChartKind, stats: Option<&DashboardStats>) -> Option<ChartSeries> {
    let stats = stats?;
    match kind {
        ChartKind::Generation => generation_series(&stats.daily_generation),
        ChartKind::Status => status_series(&stats.status_distribution),
    }
}

/// Slice colours for a status series, one per label.
#[must_use]
pub fn status_colours(series: &ChartSeries) -> Vec<&'static str> {
    series.labels.iter().map(|label| status_colour(label)).collect()
}

fn status_colour(label: &str) -> &'static str {
    match label.to_ascii_lowercase().as_str() {
        "generated" => "#0d6efd",
        "sent" => "#198754",
        "pending" => "#ffc107",
        "failed" => "#dc3545",
        _ => "#6c757d",
    }
}

/// Full constructor config for a chart.
#[must_use]
pub fn chart_config(kind: ChartKind, series: &ChartSeries, palette: ChartPalette) -> Value {
    let dataset = match kind {
        ChartKind::Generation => json!({
            "label": "Certificates Generated",
            "data": series.values,
            "borderColor": "#0d6efd",
            "backgroundColor": "rgba(13, 110, 253, 0.1)",
            "fill": true,
            "tension": 0.4
        }),
        ChartKind::Status => json!({
            "data": series.values,
            "backgroundColor": status_colours(series)
        }),
    };
    let mut options = json!({
        "plugins": { "legend": { "labels": { "color": palette.text } } }
    });
    if kind.has_scales() {
        options["scales"] = json!({
            "x": { "ticks": { "color": palette.text }, "grid": { "color": palette.grid } },
            "y": {
                "beginAtZero": true,
                "ticks": { "color": palette.text, "precision": 0 },
                "grid": { "color": palette.grid }
            }
        });
    }
    json!({
        "type": kind.chart_type(),
        "data": { "labels": series.labels, "datasets": [dataset] },
        "options": options
    })
}

/// Global `Chart.defaults` assignments applied once at start-up.
#[must_use]
pub fn default_patches(theme: ThemeMode) -> Vec<ChartPatch> {
    let mut patches = vec![
        ChartPatch::new(&["responsive"], true),
        ChartPatch::new(&["maintainAspectRatio"], false),
        ChartPatch::new(&["plugins", "legend", "labels", "usePointStyle"], true),
    ];
    if theme == ThemeMode::Dark {
        let palette = theme.chart_palette();
        patches.push(ChartPatch::new(&["color"], palette.text));
        patches.push(ChartPatch::new(&["borderColor"], palette.grid));
        if let Some(background) = palette.background {
            patches.push(ChartPatch::new(&["backgroundColor"], background));
        }
    }
    patches
}

/// `chart.options` assignments that recolour a live chart for a theme.
#[must_use]
pub fn theme_patches(kind: ChartKind, theme: ThemeMode) -> Vec<ChartPatch> {
    let palette = theme.chart_palette();
    let mut patches = vec![ChartPatch::new(
        &["plugins", "legend", "labels", "color"],
        palette.text,
    )];
    if kind.has_scales() {
        patches.extend([
            ChartPatch::new(&["scales", "x", "ticks", "color"], palette.text),
            ChartPatch::new(&["scales", "y", "ticks", "color"], palette.text),
            ChartPatch::new(&["scales", "x", "grid", "color"], palette.grid),
            ChartPatch::new(&["scales", "y", "grid", "color"], palette.grid),
        ]);
    }
    patches
}
