//! File acceptance rules, previews and CSV header checks for the upload form.
//!
//! # Design
//! - Validation is pure: the view hands in the browser file's name, size and
//!   declared media type, and gets back either a [`SelectedFile`] or the exact
//!   message to show.
//! - Spreadsheets are never parsed here; only CSV text is inspected.

use crate::core::export::{ExportError, encode_rows};
use crate::core::logic::{file_extension, format_file_size};
use csv::{QuoteStyle, ReaderBuilder};
use thiserror::Error;

/// Largest accepted upload (16 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;
/// Media types accepted without looking at the extension, in xlsx, xls, csv order.
pub const ALLOWED_MEDIA_TYPES: [&str; 3] = [
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
    "text/csv",
];
/// Value of the file input's `accept` attribute.
pub const ACCEPT_ATTRIBUTE: &str = ".xlsx,.xls,.csv";
/// Columns every CSV upload must carry, in reporting order.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "student_name",
    "roll_number",
    "branch",
    "college_name",
    "email",
    "internship_name",
];
/// Number of CSV lines shown in the preview.
pub const PREVIEW_LINES: usize = 5;
/// Characters kept per preview line before `...` is appended.
pub const PREVIEW_LINE_CHARS: usize = 100;
/// Placeholder shown instead of spreadsheet content.
pub const EXCEL_PREVIEW_PLACEHOLDER: &str = "Excel file selected - content preview not available";
/// Download name of the sample data file.
pub const SAMPLE_FILE_NAME: &str = "sample_certificate_data.csv";
/// Period of the simulated progress bar.
pub const SIMULATION_TICK_MS: u32 = 500;
/// Ceiling of the simulated progress bar.
pub const SIMULATION_CAP: f64 = 90.0;
/// Caption under the simulated progress bar.
pub const SIMULATION_TEXT: &str = "Processing file...";
/// Inline alert shown when the upload request fails.
pub const SUBMIT_FAILURE_MESSAGE: &str =
    "An error occurred while processing the file. Please try again.";

/// Reasons a selected file is refused before upload.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FileRejection {
    /// Submit pressed with nothing selected.
    #[error("Please select a file to upload.")]
    Missing,
    /// Neither the media type nor the extension is a spreadsheet or CSV.
    #[error("Invalid file type. Please upload Excel (.xlsx, .xls) or CSV files only.")]
    InvalidType,
    /// Larger than [`MAX_UPLOAD_BYTES`].
    #[error("File size too large. Maximum allowed size is 16MB.")]
    TooLarge,
}

/// Reasons CSV content is refused on submit.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CsvRejection {
    /// Fewer than two lines.
    #[error("CSV file must contain header and at least one data row")]
    NoDataRows,
    /// Required columns absent from the header, in [`REQUIRED_COLUMNS`] order.
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    /// The browser could not read the file or the header was not valid CSV.
    #[error("Error reading file content")]
    Unreadable,
}

/// Detected file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    /// Office Open XML workbook.
    Xlsx,
    /// Legacy Excel workbook.
    Xls,
    /// Comma-separated text.
    Csv,
}

impl FileKind {
    fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "xlsx" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    fn from_media_type(media_type: &str) -> Option<Self> {
        let index = ALLOWED_MEDIA_TYPES
            .iter()
            .position(|allowed| *allowed == media_type)?;
        [Self::Xlsx, Self::Xls, Self::Csv].get(index).copied()
    }

    /// Whether the content can be previewed and header-checked.
    #[must_use]
    pub const fn is_csv(self) -> bool {
        matches!(self, Self::Csv)
    }

    /// Label shown on the preview card.
    #[must_use]
    pub const fn preview_label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Xlsx | Self::Xls => "Excel",
        }
    }
}

/// Browser file properties needed for validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileMeta {
    /// File name including extension.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Declared media type; often empty for CSV on some platforms.
    pub media_type: String,
}

/// A file that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    /// Name, size and media type as reported by the browser.
    pub meta: FileMeta,
    /// Detected format.
    pub kind: FileKind,
}

impl SelectedFile {
    /// Secondary line under the file name: `"<size> • <EXT> file"`.
    #[must_use]
    pub fn info_line(&self) -> String {
        let extension = file_extension(&self.meta.name).to_ascii_uppercase();
        format!("{} • {} file", format_file_size(self.meta.size), extension)
    }
}

/// Apply the acceptance rules in order: presence, type, then size.
///
/// # Errors
/// Returns the first [`FileRejection`] that applies.
pub fn validate_file(meta: Option<FileMeta>) -> Result<SelectedFile, FileRejection> {
    let meta = meta.ok_or(FileRejection::Missing)?;
    let kind = FileKind::from_extension(file_extension(&meta.name))
        .or_else(|| FileKind::from_media_type(&meta.media_type))
        .ok_or(FileRejection::InvalidType)?;
    if meta.size > MAX_UPLOAD_BYTES {
        return Err(FileRejection::TooLarge);
    }
    Ok(SelectedFile { meta, kind })
}

/// Content preview card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePreview {
    /// Card heading (`CSV` or `Excel`).
    pub label: &'static str,
    /// Lines to render.
    pub lines: Vec<String>,
}

impl FilePreview {
    /// First lines of CSV text, each cut to [`PREVIEW_LINE_CHARS`] characters.
    #[must_use]
    pub fn from_csv(text: &str) -> Self {
        let lines = text
            .split('\n')
            .take(PREVIEW_LINES)
            .map(|line| {
                let line = line.trim_end_matches('\r');
                let mut shown: String = line.chars().take(PREVIEW_LINE_CHARS).collect();
                if line.chars().count() > PREVIEW_LINE_CHARS {
                    shown.push_str("...");
                }
                shown
            })
            .collect();
        Self {
            label: FileKind::Csv.preview_label(),
            lines,
        }
    }

    /// Placeholder card for spreadsheets.
    #[must_use]
    pub fn spreadsheet() -> Self {
        Self {
            label: FileKind::Xlsx.preview_label(),
            lines: vec![EXCEL_PREVIEW_PLACEHOLDER.to_string()],
        }
    }
}

/// Normalise a header cell: trimmed, lower-cased, spaces become underscores.
#[must_use]
pub fn normalize_header(cell: &str) -> String {
    cell.trim().to_lowercase().replace(' ', "_")
}

/// Check that CSV text has a data row and every required column.
///
/// # Errors
/// Returns a [`CsvRejection`] describing the first problem found.
pub fn validate_csv_content(content: &str) -> Result<(), CsvRejection> {
    let mut lines = content.split('\n');
    let header_line = lines.next().unwrap_or_default();
    if lines.next().is_none() {
        return Err(CsvRejection::NoDataRows);
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(header_line.trim_end_matches('\r').as_bytes());
    let headers: Vec<String> = match reader.records().next() {
        Some(Ok(record)) => record.iter().map(normalize_header).collect(),
        Some(Err(_)) => return Err(CsvRejection::Unreadable),
        None => Vec::new(),
    };
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .map(|column| (*column).to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CsvRejection::MissingColumns(missing))
    }
}

const SAMPLE_HEADERS: [&str; 18] = [
    "Student Name",
    "Roll Number",
    "Branch",
    "College Name",
    "Email",
    "Internship Name",
    "Internship Start Date",
    "Internship End Date",
    "Phone Number",
    "Duration Weeks",
    "Mentor Name",
    "Mentor Email",
    "Company Name",
    "Internship Location",
    "Performance Rating",
    "Skills Acquired",
    "Project Title",
    "Remarks",
];

const SAMPLE_ROWS: [[&str; 18]; 2] = [
    [
        "John Doe",
        "CS001",
        "Computer Science",
        "ABC University",
        "john.doe@email.com",
        "Web Development Internship",
        "2024-01-15",
        "2024-03-15",
        "+1234567890",
        "8",
        "Jane Smith",
        "jane.smith@company.com",
        "Tech Corp Ltd",
        "New York",
        "Excellent",
        "React, Node.js, MongoDB",
        "E-commerce Platform Development",
        "Outstanding performance",
    ],
    [
        "Jane Wilson",
        "CS002",
        "Computer Science",
        "ABC University",
        "jane.wilson@email.com",
        "Data Science Internship",
        "2024-02-01",
        "2024-04-01",
        "+1234567891",
        "8",
        "Bob Johnson",
        "bob.johnson@company.com",
        "Data Analytics Inc",
        "San Francisco",
        "Good",
        "Python, Pandas, Machine Learning",
        "Customer Behavior Analysis",
        "Good analytical skills",
    ],
];

/// Sample upload file with every field quoted.
///
/// # Errors
/// Returns [`ExportError`] when CSV encoding fails.
pub fn sample_csv() -> Result<String, ExportError> {
    let rows = std::iter::once(SAMPLE_HEADERS).chain(SAMPLE_ROWS);
    encode_rows(rows, QuoteStyle::Always)
}

/// Advance the simulated bar by `jitter * 10` (jitter in `0.0..1.0`).
/// Returns the new value and whether the cap was reached.
#[must_use]
pub fn advance_simulation(current: f64, jitter: f64) -> (f64, bool) {
    let next = (current + jitter.clamp(0.0, 1.0) * 10.0).min(SIMULATION_CAP);
    (next, next >= SIMULATION_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(name: &str, size: u64, media_type: &str) -> Option<FileMeta> {
        Some(FileMeta {
            name: name.to_string(),
            size,
            media_type: media_type.to_string(),
        })
    }

    #[test]
    fn small_csv_is_accepted() {
        let file = validate_file(meta("students.csv", 2048, "text/csv")).unwrap();
        assert_eq!(file.kind, FileKind::Csv);
        assert_eq!(file.info_line(), "2 KB • CSV file");
    }

    #[test]
    fn extension_alone_is_enough() {
        let file = validate_file(meta("roster.XLSX", 10, "")).unwrap();
        assert_eq!(file.kind, FileKind::Xlsx);
        let file = validate_file(meta("export", 10, "application/vnd.ms-excel")).unwrap();
        assert_eq!(file.kind, FileKind::Xls);
    }

    #[test]
    fn media_type_alone_is_enough() {
        let kinds: Vec<FileKind> = ALLOWED_MEDIA_TYPES
            .iter()
            .map(|media_type| validate_file(meta("upload", 10, media_type)).unwrap().kind)
            .collect();
        assert_eq!(kinds, vec![FileKind::Xlsx, FileKind::Xls, FileKind::Csv]);
    }

    #[test]
    fn rules_apply_in_order() {
        assert_eq!(validate_file(None), Err(FileRejection::Missing));
        assert_eq!(
            validate_file(meta("notes.pdf", MAX_UPLOAD_BYTES + 1, "application/pdf")),
            Err(FileRejection::InvalidType)
        );
        assert_eq!(
            validate_file(meta("big.xlsx", 20 * 1024 * 1024, "")),
            Err(FileRejection::TooLarge)
        );
        assert!(validate_file(meta("edge.csv", MAX_UPLOAD_BYTES, "")).is_ok());
    }

    #[test]
    fn rejection_messages_match_the_ui() {
        assert_eq!(
            FileRejection::InvalidType.to_string(),
            "Invalid file type. Please upload Excel (.xlsx, .xls) or CSV files only."
        );
        assert_eq!(
            FileRejection::TooLarge.to_string(),
            "File size too large. Maximum allowed size is 16MB."
        );
        assert_eq!(
            FileRejection::Missing.to_string(),
            "Please select a file to upload."
        );
    }

    #[test]
    fn preview_keeps_five_truncated_lines() {
        let long = "x".repeat(130);
        let text = format!("a,b\r\n{long}\n3\n4\n5\n6\n7");
        let preview = FilePreview::from_csv(&text);
        assert_eq!(preview.label, "CSV");
        assert_eq!(preview.lines.len(), 5);
        assert_eq!(preview.lines[0], "a,b");
        assert_eq!(preview.lines[1], format!("{}...", "x".repeat(100)));
        assert_eq!(preview.lines[4], "5");
        assert_eq!(
            FilePreview::spreadsheet().lines,
            vec![EXCEL_PREVIEW_PLACEHOLDER]
        );
    }

    #[test]
    fn csv_needs_a_data_row() {
        assert_eq!(
            validate_csv_content("student_name,roll_number"),
            Err(CsvRejection::NoDataRows)
        );
        assert_eq!(
            CsvRejection::NoDataRows.to_string(),
            "CSV file must contain header and at least one data row"
        );
    }

    #[test]
    fn missing_columns_are_listed_in_order() {
        let content = "student_name,roll_number,branch,college_name\nA,1,CS,X";
        let err = validate_csv_content(content).unwrap_err();
        assert_eq!(
            err,
            CsvRejection::MissingColumns(vec!["email".into(), "internship_name".into()])
        );
        assert_eq!(
            err.to_string(),
            "Missing required columns: email, internship_name"
        );
    }

    #[test]
    fn complete_header_passes_with_spacing_and_case() {
        let content = " Student_Name ,ROLL_NUMBER,branch,college_name,email,internship_name\r\nA,1,CS,X,a@x,Web";
        assert_eq!(validate_csv_content(content), Ok(()));
    }

    #[test]
    fn sample_file_passes_its_own_header_check() {
        let sample = sample_csv().unwrap();
        assert_eq!(validate_csv_content(&sample), Ok(()));
        let mut lines = sample.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("\"Student Name\",\"Roll Number\""));
        assert_eq!(header.split(',').count(), 18);
        assert!(
            lines
                .next()
                .unwrap()
                .contains("\"React, Node.js, MongoDB\"")
        );
        assert_eq!(sample.lines().count(), 3);
        assert!(!sample.ends_with('\n'));
    }

    #[test]
    fn simulation_caps_at_ninety() {
        assert_eq!(advance_simulation(0.0, 0.5), (5.0, false));
        assert_eq!(advance_simulation(85.0, 0.9), (SIMULATION_CAP, true));
        assert_eq!(advance_simulation(89.0, 0.0), (89.0, false));
    }
}
