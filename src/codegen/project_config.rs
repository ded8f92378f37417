//! Project configuration schema for trackgen.yaml
//!
//! Every key is optional:
//!
//! ```yaml
//! input: analytics.csv
//! output: Swift/GeneratedTrackingFunctions.swift
//! sheets:
//!   timeout_secs: 30
//!   export_base: https://docs.google.com
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::source::sheets::{SheetsOptions, DEFAULT_EXPORT_BASE, DEFAULT_TIMEOUT};

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "trackgen.yaml";

/// Environment variable overriding the input locator
pub const INPUT_ENV_VAR: &str = "TRACKGEN_INPUT";

/// Environment variable overriding the output path
pub const OUTPUT_ENV_VAR: &str = "TRACKGEN_OUTPUT";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration from trackgen.yaml
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProjectConfig {
    /// CSV path or Google Sheets URL
    #[serde(default = "default_input")]
    pub input: String,
    /// Generated Swift file
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default)]
    pub sheets: SheetsConfig,
}

/// Google Sheets fetch settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SheetsConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_export_base")]
    pub export_base: String,
}

fn default_input() -> String {
    "analytics.csv".to_string()
}

fn default_output() -> String {
    "Swift/GeneratedTrackingFunctions.swift".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_export_base() -> String {
    DEFAULT_EXPORT_BASE.to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            sheets: SheetsConfig::default(),
        }
    }
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            export_base: default_export_base(),
        }
    }
}

impl ProjectConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file deserializes to unit, not to an empty mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Load an explicit config file, or trackgen.yaml if present, or defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            tracing::debug!("Using configuration from {}", default_path.display());
            return Self::from_file(default_path);
        }

        Ok(Self::default())
    }

    /// Apply `TRACKGEN_INPUT` / `TRACKGEN_OUTPUT` from the environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(INPUT_ENV_VAR).ok(),
            std::env::var(OUTPUT_ENV_VAR).ok(),
        );
    }

    /// Replace input and output with any non-empty override
    pub fn apply_overrides(&mut self, input: Option<String>, output: Option<String>) {
        if let Some(input) = input.filter(|v| !v.trim().is_empty()) {
            self.input = input;
        }
        if let Some(output) = output.filter(|v| !v.trim().is_empty()) {
            self.output = output;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.trim().is_empty() {
            return Err(ConfigError::Invalid("input must not be empty".to_string()));
        }

        if self.output.trim().is_empty() {
            return Err(ConfigError::Invalid("output must not be empty".to_string()));
        }

        if self.sheets.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "sheets.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if !self.sheets.export_base.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "sheets.export_base must use HTTPS: {}",
                self.sheets.export_base
            )));
        }

        Ok(())
    }

    /// Request settings for Google Sheets sources
    pub fn sheets_options(&self) -> SheetsOptions {
        SheetsOptions {
            timeout: Duration::from_secs(self.sheets.timeout_secs),
            export_base: self.sheets.export_base.clone(),
        }
    }
}
