//! Pure UI helpers extracted from components for non-wasm testing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Statistics summary endpoint.
pub const DASHBOARD_STATS_PATH: &str = "/api/dashboard_stats";

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Build the progress endpoint path for a batch, percent-encoding the identifier.
#[must_use]
pub fn upload_progress_path(batch_id: &str) -> String {
    format!("/api/upload_progress/{}", urlencoding::encode(batch_id))
}

/// Human-readable file size with at most two decimals (`1536` -> `1.5 KB`).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0usize;
    let mut scale = 1u64;
    while unit + 1 < SIZE_UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }
    let value = bytes as f64 / scale as f64;
    let rendered = format!("{value:.2}");
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", SIZE_UNITS[unit])
}

/// Extension after the last dot, or an empty string for dot-less and dot-file names.
#[must_use]
pub fn file_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(index) if index > 0 => &name[index + 1..],
        _ => "",
    }
}

/// Upper-case the first character and keep the rest untouched.
#[must_use]
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Format an API date (`YYYY-MM-DD` or RFC 3339) as a short axis label (`Jan 5`).
///
/// Unparseable input is returned unchanged.
#[must_use]
pub fn format_short_date(raw: &str) -> String {
    let trimmed = raw.trim();
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        });
    date.map_or_else(
        || trimmed.to_string(),
        |date| date.format("%b %-d").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_path_encodes_identifier() {
        assert_eq!(upload_progress_path("42"), "/api/upload_progress/42");
        assert_eq!(
            upload_progress_path("batch 7/a"),
            "/api/upload_progress/batch%207%2Fa"
        );
    }

    #[test]
    fn file_sizes_trim_trailing_zeros() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(16 * 1024 * 1024), "16 MB");
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024 * 1024), "5120 GB");
    }

    #[test]
    fn extensions_follow_last_dot() {
        assert_eq!(file_extension("students.CSV"), "CSV");
        assert_eq!(file_extension("archive.tar.xlsx"), "xlsx");
        assert_eq!(file_extension("README"), "");
        assert_eq!(file_extension(".hidden"), "");
        assert_eq!(file_extension("trailing."), "");
    }

    #[test]
    fn capitalize_handles_empty_and_unicode() {
        assert_eq!(capitalize_first("sent"), "Sent");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("éclair"), "Éclair");
    }

    #[test]
    fn short_dates_accept_common_shapes() {
        assert_eq!(format_short_date("2024-01-05"), "Jan 5");
        assert_eq!(format_short_date("2024-03-15T10:00:00Z"), "Mar 15");
        assert_eq!(format_short_date("2024-12-31T23:59:59"), "Dec 31");
        assert_eq!(format_short_date("yesterday"), "yesterday");
    }
}
