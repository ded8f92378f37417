//! Code generation framework for tracking functions.
//!
//! This module turns raw event tables into Swift source: rows are parsed,
//! expanded, deduplicated and rendered one function per event.

pub mod classifier;
pub mod dedup;
pub mod fs_utils;
pub mod orchestration;
pub mod project_config;
pub mod swift_codegen;
pub mod table_parser;
pub mod types;
pub mod utils;
pub mod variants;

// Re-export key types
pub use classifier::{classify_field, FieldValue};
pub use dedup::{deduplicate, Deduplicated, DuplicateConflict};
pub use orchestration::{generate, plan, GenerateError, GenerationPlan, GenerationReport};
pub use project_config::{ConfigError, ProjectConfig};
pub use swift_codegen::{generate_function, render_document, TrackingFunction};
pub use table_parser::{parse_table, ColumnMap};
pub use types::{EventKey, EventRow, FieldKind, Parameter};
pub use utils::{to_lower_camel, to_upper_camel};
pub use variants::split_variants;

/// Generate the Swift file for `input` (CSV path or Google Sheets URL).
///
/// # Example
///
/// ```rust,no_run
/// let report = trackgen::codegen::generate_from_input(
///     "analytics.csv",
///     "Swift/GeneratedTrackingFunctions.swift",
/// )
/// .expect("Code generation failed");
/// println!("{} functions", report.functions);
/// ```
pub fn generate_from_input(
    input: &str,
    output: impl AsRef<std::path::Path>,
) -> Result<GenerationReport, GenerateError> {
    let source = crate::source::open_source(input, &crate::source::SheetsOptions::default())?;
    generate(source.as_ref(), output.as_ref())
}
