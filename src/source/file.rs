//! Local CSV file source

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::source::{read_csv, InputSource, RawTable, SourceError};

#[derive(Debug, Clone)]
pub struct FileInputSource {
    path: PathBuf,
}

impl FileInputSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InputSource for FileInputSource {
    fn describe(&self) -> String {
        format!("CSV file {}", self.path.display())
    }

    fn fetch_rows(&self) -> Result<RawTable, SourceError> {
        if !self.path.is_file() {
            return Err(SourceError::NotFound(format!(
                "Input file not found: {}",
                self.path.display()
            )));
        }

        let file = File::open(&self.path).map_err(|e| {
            SourceError::InvalidInput(format!("Failed to open {}: {}", self.path.display(), e))
        })?;

        read_csv(file).map_err(|e| {
            SourceError::InvalidInput(format!("Failed to read {}: {}", self.path.display(), e))
        })
    }
}
