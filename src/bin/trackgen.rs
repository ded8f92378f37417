//! trackgen CLI - Swift tracking function generation from CSV files and Google Sheets
//!
//! Reads analytics event definitions and writes one Swift `static func` per event.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

use trackgen::codegen::{self, ProjectConfig};
use trackgen::{DuplicateConflict, EventRow, GoogleSheetsInputSource, InputOrigin};

#[derive(Parser)]
#[command(name = "trackgen")]
#[command(
    version,
    about = "Generate Swift analytics tracking functions from CSV files or Google Sheets",
    long_about = None
)]
struct Cli {
    /// Path to configuration file (default: trackgen.yaml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the Swift tracking functions file
    Generate {
        /// CSV file path or Google Sheets URL (default: analytics.csv)
        #[arg(short, long)]
        input: Option<String>,

        /// Output Swift file (default: Swift/GeneratedTrackingFunctions.swift)
        #[arg(short, long)]
        output: Option<String>,

        /// Print the generated code instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Parse and deduplicate the input without generating code
    Validate {
        /// CSV file path or Google Sheets URL (default: analytics.csv)
        #[arg(short, long)]
        input: Option<String>,

        /// Print the unique events and conflicts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how an input locator will be read
    Detect {
        /// CSV file path or Google Sheets URL
        input: String,
    },
}

/// JSON output of the validate command
#[derive(Serialize)]
struct ValidationSummary<'a> {
    rows_parsed: usize,
    events: &'a [EventRow],
    conflicts: &'a [DuplicateConflict],
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trackgen=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    // Load environment variables
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { input, output, dry_run } => {
            generate_code(cli.config.as_deref(), input, output, dry_run)
        }
        Commands::Validate { input, json } => {
            validate_input(cli.config.as_deref(), input, json)
        }
        Commands::Detect { input } => {
            detect_input(cli.config.as_deref(), &input)
        }
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        process::exit(1);
    }
}

/// Resolve configuration with precedence: CLI > ENV > config file > default
fn load_config(
    config_path: Option<&Path>,
    input: Option<String>,
    output: Option<String>,
) -> Result<ProjectConfig, String> {
    let mut config = ProjectConfig::discover(config_path).map_err(|e| e.to_string())?;
    config.apply_env();
    config.apply_overrides(input, output);
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Generate Swift code from the configured input
fn generate_code(
    config_path: Option<&Path>,
    input: Option<String>,
    output: Option<String>,
    dry_run: bool,
) -> Result<(), String> {
    let config = load_config(config_path, input, output)?;

    let source = trackgen::open_source(&config.input, &config.sheets_options())
        .map_err(|e| e.to_string())?;
    tracing::info!("Reading events from {}", source.describe());

    if dry_run {
        let plan = codegen::plan(source.as_ref()).map_err(|e| e.to_string())?;
        print!("{}", plan.document);
        eprintln!("ℹ {} functions (dry run, nothing written)", plan.function_count());
        return Ok(());
    }

    let report = codegen::generate(source.as_ref(), Path::new(&config.output))
        .map_err(|e| e.to_string())?;

    println!(
        "✅ Generated {} functions → {}",
        report.functions,
        report.output.display()
    );
    if !report.conflicts.is_empty() {
        println!("⚠️ {} conflicting rows ignored", report.conflicts.len());
    }

    Ok(())
}

/// Parse the input and report what would be generated
fn validate_input(
    config_path: Option<&Path>,
    input: Option<String>,
    json: bool,
) -> Result<(), String> {
    let config = load_config(config_path, input, None)?;

    let source = trackgen::open_source(&config.input, &config.sheets_options())
        .map_err(|e| e.to_string())?;
    let plan = codegen::plan(source.as_ref()).map_err(|e| e.to_string())?;

    if json {
        let summary = ValidationSummary {
            rows_parsed: plan.rows_parsed,
            events: &plan.rows,
            conflicts: &plan.conflicts,
        };
        let rendered = serde_json::to_string_pretty(&summary)
            .map_err(|e| format!("Failed to serialize summary: {}", e))?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("✅ {} is valid", source.describe());
    println!("  ✓ {} rows parsed", plan.rows_parsed);
    println!("  ✓ {} unique events", plan.function_count());
    if plan.conflicts.is_empty() {
        println!("  ✓ No conflicting definitions");
    } else {
        println!("  ⚠️ {} conflicting definitions (first one kept)", plan.conflicts.len());
    }

    Ok(())
}

/// Print the detected origin of an input locator
fn detect_input(config_path: Option<&Path>, input: &str) -> Result<(), String> {
    let config = load_config(config_path, Some(input.to_string()), None)?;

    match trackgen::detect_origin(input).map_err(|e| e.to_string())? {
        InputOrigin::File(path) => {
            println!("📄 CSV file: {}", path.display());
            if !path.is_file() {
                println!("  ⚠️ File does not exist");
            }
        }
        InputOrigin::GoogleSheets(url) => {
            let sheet = GoogleSheetsInputSource::with_options(&url, config.sheets_options())
                .map_err(|e| e.to_string())?;
            println!("📊 Google Sheet");
            println!("  Spreadsheet ID: {}", sheet.sheet_id());
            println!("  Tab (gid): {}", sheet.gid());
            println!("  Export URL: {}", sheet.export_url());
        }
    }

    Ok(())
}
