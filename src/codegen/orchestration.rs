//! End-to-end generation: fetch, parse, deduplicate, render, write.

use std::path::{Path, PathBuf};

use crate::codegen::dedup::{deduplicate, DuplicateConflict};
use crate::codegen::fs_utils;
use crate::codegen::swift_codegen::render_document;
use crate::codegen::table_parser::parse_table;
use crate::codegen::types::EventRow;
use crate::source::{InputSource, SourceError};

/// Error type for a generation run
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything produced by a run, before anything is written
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    /// Complete contents of the generated Swift file
    pub document: String,
    /// Unique rows, one per generated function
    pub rows: Vec<EventRow>,
    /// Rows produced by the parser, variants included, before deduplication
    pub rows_parsed: usize,
    pub conflicts: Vec<DuplicateConflict>,
}

impl GenerationPlan {
    pub fn function_count(&self) -> usize {
        self.rows.len()
    }
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Number of functions written
    pub functions: usize,
    pub rows_parsed: usize,
    pub conflicts: Vec<DuplicateConflict>,
    pub output: PathBuf,
}

/// Run the pipeline without touching the filesystem
pub fn plan(source: &dyn InputSource) -> Result<GenerationPlan, SourceError> {
    let table = source.fetch_rows()?;
    tracing::debug!("Read {} raw rows from {}", table.len(), source.describe());

    let parsed = parse_table(&table);
    let rows_parsed = parsed.len();

    let deduplicated = deduplicate(parsed);
    for conflict in &deduplicated.conflicts {
        tracing::warn!("⚠️ {}", conflict);
    }

    let document = render_document(&deduplicated.rows);

    Ok(GenerationPlan {
        document,
        rows: deduplicated.rows,
        rows_parsed,
        conflicts: deduplicated.conflicts,
    })
}

/// Generate the Swift file at `output` from `source`.
///
/// Nothing is written unless the source was read successfully; the output
/// file is replaced atomically.
pub fn generate(
    source: &dyn InputSource,
    output: &Path,
) -> Result<GenerationReport, GenerateError> {
    let plan = plan(source)?;

    fs_utils::write_file_atomic(output, &plan.document).map_err(|source| GenerateError::Io {
        path: output.to_path_buf(),
        source,
    })?;

    tracing::info!(
        "Wrote {} tracking functions to {}",
        plan.function_count(),
        output.display()
    );

    Ok(GenerationReport {
        functions: plan.function_count(),
        rows_parsed: plan.rows_parsed,
        conflicts: plan.conflicts,
        output: output.to_path_buf(),
    })
}
