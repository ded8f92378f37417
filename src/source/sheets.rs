//! Google Sheets source.
//!
//! Fetches the CSV export of one tab. The sheet must be readable without
//! authentication ("Anyone with the link can view").

use regex::Regex;
use reqwest::StatusCode;
use std::sync::OnceLock;
use std::time::Duration;

use crate::source::{read_csv, InputSource, RawTable, SourceError};

/// Host serving the CSV export endpoint
pub const DEFAULT_EXPORT_BASE: &str = "https://docs.google.com";

/// Upper bound for a single export request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Tab fetched when the URL carries no `gid`
const DEFAULT_GID: &str = "0";

fn sheet_id_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"/spreadsheets/d/([a-zA-Z0-9_-]+)").expect("valid sheet id pattern")
    })
}

fn gid_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[#&]gid=([0-9]+)").expect("valid gid pattern"))
}

/// Request settings for the export fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetsOptions {
    pub timeout: Duration,
    /// Scheme and host the export URL is built on
    pub export_base: String,
}

impl Default for SheetsOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            export_base: DEFAULT_EXPORT_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleSheetsInputSource {
    url: String,
    sheet_id: String,
    gid: String,
    options: SheetsOptions,
}

impl GoogleSheetsInputSource {
    /// Parse a Google Sheets URL using the default request settings
    pub fn new(url: &str) -> Result<Self, SourceError> {
        Self::with_options(url, SheetsOptions::default())
    }

    pub fn with_options(url: &str, options: SheetsOptions) -> Result<Self, SourceError> {
        let sheet_id = sheet_id_pattern()
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                SourceError::InvalidInput(format!(
                    "Invalid Google Sheets URL: {}\n\
                     Expected format: https://docs.google.com/spreadsheets/d/SHEET_ID",
                    url
                ))
            })?;

        let gid = gid_pattern()
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| DEFAULT_GID.to_string());

        Ok(Self {
            url: url.to_string(),
            sheet_id,
            gid,
            options,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn sheet_id(&self) -> &str {
        &self.sheet_id
    }

    pub fn gid(&self) -> &str {
        &self.gid
    }

    /// CSV export URL for the selected tab
    pub fn export_url(&self) -> String {
        format!(
            "{}/spreadsheets/d/{}/export?format=csv&gid={}",
            self.options.export_base.trim_end_matches('/'),
            self.sheet_id,
            self.gid
        )
    }

    fn status_error(&self, status: StatusCode) -> SourceError {
        match status {
            StatusCode::NOT_FOUND => SourceError::NotFound(format!(
                "Google Sheet not found: {}\nCheck the URL and ensure the sheet exists.",
                self.url
            )),
            StatusCode::FORBIDDEN => SourceError::InvalidInput(format!(
                "Permission denied: {}\n\
                 Ensure the Google Sheet is publicly accessible or shared with \
                 'Anyone with the link can view'.",
                self.url
            )),
            other => SourceError::InvalidInput(format!(
                "HTTP error {} when fetching Google Sheet: {}\nDetails: {}",
                other.as_u16(),
                self.url,
                other.canonical_reason().unwrap_or("Unknown")
            )),
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> SourceError {
        if err.is_connect() || err.is_timeout() {
            return SourceError::Network(format!(
                "Network error: Unable to connect to Google Sheets.\n\
                 Check your internet connection and try again.\nDetails: {}",
                err
            ));
        }
        self.unexpected(err)
    }

    fn unexpected(&self, err: impl std::fmt::Display) -> SourceError {
        SourceError::Unexpected(format!(
            "Unexpected error fetching Google Sheet: {}\nDetails: {}",
            self.url, err
        ))
    }
}

impl InputSource for GoogleSheetsInputSource {
    fn describe(&self) -> String {
        format!("Google Sheet {} (gid {})", self.sheet_id, self.gid)
    }

    fn fetch_rows(&self) -> Result<RawTable, SourceError> {
        let export_url = self.export_url();
        tracing::debug!("Fetching {}", export_url);

        let client = reqwest::blocking::Client::builder()
            .timeout(self.options.timeout)
            .build()
            .map_err(|e| self.unexpected(e))?;

        let response = client
            .get(&export_url)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.status_error(status));
        }

        let body = response.bytes().map_err(|e| self.transport_error(e))?;
        let text = std::str::from_utf8(&body).map_err(|e| self.unexpected(e))?;

        read_csv(text.as_bytes()).map_err(|e| self.unexpected(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve one canned HTTP response on a local port, return its base URL
    fn serve_once(status_line: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let head = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status_line,
                body.len()
            );
            stream.write_all(head.as_bytes()).unwrap();
            stream.write_all(body).unwrap();
        });

        format!("http://{}", addr)
    }

    fn local_source(base: String) -> GoogleSheetsInputSource {
        GoogleSheetsInputSource::with_options(
            "https://docs.google.com/spreadsheets/d/ABC123/edit#gid=7",
            SheetsOptions {
                timeout: Duration::from_secs(5),
                export_base: base,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_extract_sheet_id() {
        let source = GoogleSheetsInputSource::new(
            "https://docs.google.com/spreadsheets/d/ABC123XYZ/edit",
        )
        .unwrap();
        assert_eq!(source.sheet_id(), "ABC123XYZ");

        let source = GoogleSheetsInputSource::new(
            "https://docs.google.com/spreadsheets/d/ABC-123_XYZ/edit#gid=0",
        )
        .unwrap();
        assert_eq!(source.sheet_id(), "ABC-123_XYZ");
    }

    #[test]
    fn test_extract_gid() {
        let source = GoogleSheetsInputSource::new(
            "https://docs.google.com/spreadsheets/d/ABC123/edit#gid=456",
        )
        .unwrap();
        assert_eq!(source.sheet_id(), "ABC123");
        assert_eq!(source.gid(), "456");

        let source = GoogleSheetsInputSource::new(
            "https://docs.google.com/spreadsheets/d/ABC123/export?format=csv&gid=789",
        )
        .unwrap();
        assert_eq!(source.gid(), "789");

        let source = GoogleSheetsInputSource::new(
            "https://docs.google.com/spreadsheets/d/ABC123/edit",
        )
        .unwrap();
        assert_eq!(source.gid(), "0");
    }

    #[test]
    fn test_export_url() {
        let source = GoogleSheetsInputSource::new(
            "https://docs.google.com/spreadsheets/d/ABC123/edit",
        )
        .unwrap();
        assert_eq!(
            source.export_url(),
            "https://docs.google.com/spreadsheets/d/ABC123/export?format=csv&gid=0"
        );

        let source = GoogleSheetsInputSource::new(
            "https://docs.google.com/spreadsheets/d/ABC123/edit#gid=456",
        )
        .unwrap();
        assert_eq!(
            source.export_url(),
            "https://docs.google.com/spreadsheets/d/ABC123/export?format=csv&gid=456"
        );
    }

    #[test]
    fn test_missing_sheet_id() {
        let err =
            GoogleSheetsInputSource::new("https://docs.google.com/spreadsheets/").unwrap_err();
        assert!(matches!(err, SourceError::InvalidInput(_)));
        assert!(err.to_string().contains("Invalid Google Sheets URL"));
    }

    #[test]
    fn test_fetch_rows_success() {
        let base = serve_once(
            "200 OK",
            b"screen:,section:,component:,element:,action:\nmy_ad,boost,post,button,tap\n",
        );
        let rows = local_source(base).fetch_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["my_ad", "boost", "post", "button", "tap"]);
    }

    #[test]
    fn test_fetch_rows_not_found() {
        let base = serve_once("404 Not Found", b"");
        let err = local_source(base).fetch_rows().unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
        assert!(err.to_string().contains("Google Sheet not found"));
    }

    #[test]
    fn test_fetch_rows_permission_denied() {
        let base = serve_once("403 Forbidden", b"");
        let err = local_source(base).fetch_rows().unwrap_err();
        assert!(matches!(err, SourceError::InvalidInput(_)));
        assert!(err.to_string().contains("Permission denied"));
    }

    #[test]
    fn test_fetch_rows_other_status() {
        let base = serve_once("500 Internal Server Error", b"");
        let err = local_source(base).fetch_rows().unwrap_err();
        assert!(matches!(err, SourceError::InvalidInput(_)));
        let message = err.to_string();
        assert!(message.contains("HTTP error 500"));
        assert!(message.contains("Internal Server Error"));
    }

    #[test]
    fn test_fetch_rows_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = local_source(format!("http://{}", addr)).fetch_rows().unwrap_err();
        assert!(matches!(err, SourceError::Network(_)));
    }

    #[test]
    fn test_fetch_rows_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        // Accept the connection and never answer
        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            thread::sleep(Duration::from_secs(5));
            drop(stream);
        });

        let source = GoogleSheetsInputSource::with_options(
            "https://docs.google.com/spreadsheets/d/ABC123/edit",
            SheetsOptions {
                timeout: Duration::from_millis(500),
                export_base: format!("http://{}", addr),
            },
        )
        .unwrap();

        let err = source.fetch_rows().unwrap_err();
        assert!(matches!(err, SourceError::Network(_)));
    }

    #[test]
    fn test_fetch_rows_invalid_utf8() {
        let base = serve_once("200 OK", b"\xff\xfe");
        let err = local_source(base).fetch_rows().unwrap_err();
        assert!(matches!(err, SourceError::Unexpected(_)));
    }
}
