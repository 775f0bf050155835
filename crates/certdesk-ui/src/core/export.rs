//! CSV encoding for client-side downloads.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use thiserror::Error;

/// Failures while rendering a CSV download.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A record could not be encoded.
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),
    /// The in-memory buffer could not be flushed.
    #[error("csv buffer flush failed: {0}")]
    Flush(String),
    /// The encoded bytes were not UTF-8.
    #[error("csv output was not utf-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Encode rows with `\n` separators and no trailing newline.
///
/// # Errors
/// Returns [`ExportError`] when encoding or flushing the buffer fails.
pub fn encode_rows<R, F>(rows: R, quote: QuoteStyle) -> Result<String, ExportError>
where
    R: IntoIterator,
    R::Item: IntoIterator<Item = F>,
    F: AsRef<[u8]>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(quote)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.error().to_string()))?;
    let mut text = String::from_utf8(bytes)?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}
