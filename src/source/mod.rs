//! Input sources for event definition tables.
//!
//! Event definitions live either in a local CSV file or in a Google Sheets
//! spreadsheet. Both are normalized into a [`RawTable`] so the parser never
//! needs to know where rows came from.

pub mod file;
pub mod sheets;

pub use file::FileInputSource;
pub use sheets::{GoogleSheetsInputSource, SheetsOptions};

use std::fmt;
use std::io::Read;
use std::path::PathBuf;

/// Rows of string cells, header row included when the source has one
pub type RawTable = Vec<Vec<String>>;

/// Error type for input sources
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Local file or remote sheet does not exist
    #[error("{0}")]
    NotFound(String),

    /// Malformed or unsupported locator, permission denial, HTTP failure
    #[error("{0}")]
    InvalidInput(String),

    /// Transport failure (DNS, connection, timeout)
    #[error("{0}")]
    Network(String),

    /// Anything else that went wrong while fetching
    #[error("{0}")]
    Unexpected(String),
}

/// Where event definitions are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOrigin {
    File(PathBuf),
    GoogleSheets(String),
}

impl fmt::Display for InputOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputOrigin::File(path) => write!(f, "CSV file {}", path.display()),
            InputOrigin::GoogleSheets(url) => write!(f, "Google Sheet {}", url),
        }
    }
}

/// Provider of raw tabular rows
pub trait InputSource {
    /// Human-readable description used in logs
    fn describe(&self) -> String;

    /// Read every row of the table
    fn fetch_rows(&self) -> Result<RawTable, SourceError>;
}

/// Decide whether `input` is a file path or a Google Sheets URL.
///
/// Plain `http://` and non-Sheets `https://` URLs are rejected.
pub fn detect_origin(input: &str) -> Result<InputOrigin, SourceError> {
    let input = input.trim();

    if input.starts_with("http://") {
        return Err(SourceError::InvalidInput(
            "Google Sheets URLs must use HTTPS. Please use https:// instead of http://".to_string(),
        ));
    }

    if input.starts_with("https://") {
        if input.contains("docs.google.com/spreadsheets") {
            return Ok(InputOrigin::GoogleSheets(input.to_string()));
        }
        return Err(SourceError::InvalidInput(format!(
            "Unsupported URL: {}\nOnly Google Sheets URLs are supported. \
             Expected format: https://docs.google.com/spreadsheets/d/SHEET_ID",
            input
        )));
    }

    Ok(InputOrigin::File(PathBuf::from(input)))
}

/// Resolve `input` and build the matching source
pub fn open_source(
    input: &str,
    options: &SheetsOptions,
) -> Result<Box<dyn InputSource>, SourceError> {
    match detect_origin(input)? {
        InputOrigin::File(path) => Ok(Box::new(FileInputSource::new(path))),
        InputOrigin::GoogleSheets(url) => Ok(Box::new(GoogleSheetsInputSource::with_options(
            &url,
            options.clone(),
        )?)),
    }
}

/// Parse comma-separated text with standard quoting.
///
/// No header handling and no record-length checks happen here.
pub(crate) fn read_csv<R: Read>(reader: R) -> Result<RawTable, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_file_paths() {
        assert_eq!(
            detect_origin("/path/to/analytics.csv").unwrap(),
            InputOrigin::File(PathBuf::from("/path/to/analytics.csv"))
        );
        assert_eq!(
            detect_origin("  analytics.csv ").unwrap(),
            InputOrigin::File(PathBuf::from("analytics.csv"))
        );
    }

    #[test]
    fn test_detect_google_sheets() {
        let url = "https://docs.google.com/spreadsheets/d/ABC123/edit#gid=456";
        assert_eq!(
            detect_origin(url).unwrap(),
            InputOrigin::GoogleSheets(url.to_string())
        );
    }

    #[test]
    fn test_reject_http() {
        let err = detect_origin("http://docs.google.com/spreadsheets/d/ABC123/edit").unwrap_err();
        assert!(matches!(err, SourceError::InvalidInput(_)));
        assert!(err.to_string().contains("HTTPS"));
    }

    #[test]
    fn test_reject_other_https_hosts() {
        let err = detect_origin("https://example.com/spreadsheet").unwrap_err();
        assert!(matches!(err, SourceError::InvalidInput(_)));
        assert!(err.to_string().contains("Unsupported URL"));
    }

    #[test]
    fn test_read_csv_keeps_ragged_rows_and_quotes() {
        let data = "screen:,section:\nmy_ad,\"boost, photo\",post\n";
        let rows = read_csv(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["screen:", "section:"]);
        assert_eq!(rows[1], vec!["my_ad", "boost, photo", "post"]);
    }

    #[test]
    fn test_open_source_rejects_bad_sheet_url() {
        let err = open_source("https://docs.google.com/spreadsheets/", &SheetsOptions::default())
            .err()
            .unwrap();
        assert!(matches!(err, SourceError::InvalidInput(_)));
    }
}
