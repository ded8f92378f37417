//! Integration tests for trackgen sources, parsing and generation

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{NamedTempFile, TempDir};
use trackgen::codegen::{self, generate_from_input};
use trackgen::{
    detect_origin, open_source, FileInputSource, InputOrigin, SheetsOptions, SourceError,
};

fn csv_file(lines: &[&str]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

fn output_path(dir: &TempDir) -> PathBuf {
    dir.path().join("Swift/GeneratedTrackingFunctions.swift")
}

fn generate(csv: &Path, output: &Path) -> codegen::GenerationReport {
    generate_from_input(csv.to_str().unwrap(), output).unwrap()
}

#[test]
fn test_generate_from_csv() {
    let csv = csv_file(&[
        "my_ad,boost_photo,post,onboarding,view,,",
        "my_ad,boost_photo,post,button,tap,event_details,ad",
    ]);
    let dir = tempfile::tempdir().unwrap();
    let output = output_path(&dir);

    let report = generate(csv.path(), &output);
    assert_eq!(report.functions, 2);

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.starts_with("// Auto-generated tracking functions\n\n"));
    assert!(content.contains("static func trackMyAdBoostPhotoPostOnboardingView() {"));
    assert!(content.contains(
        "static func trackMyAdBoostPhotoPostButtonTap(advertisement: EventAdvertisementProtocol, parameters: [EventDetailsParameter]) {"
    ));
    assert!(content.contains("EventFactory.event(for: advertisement, with: eventDetails)"));
    assert!(content.contains("details: .defined(parameters)"));
}

#[test]
fn test_literal_rows_take_no_parameters() {
    let csv = csv_file(&["my_ad,boost_photo,post,onboarding,view,,"]);
    let dir = tempfile::tempdir().unwrap();
    let output = output_path(&dir);

    assert_eq!(generate(csv.path(), &output).functions, 1);

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content.matches("static func ").count(), 1);
    assert!(content.contains("static func trackMyAdBoostPhotoPostOnboardingView() {"));
}

#[test]
fn test_parameterized_component() {
    let csv = csv_file(&["my_ad,boost_photo,|,button,tap,,"]);
    let dir = tempfile::tempdir().unwrap();
    let output = output_path(&dir);

    generate(csv.path(), &output);

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains(
        "static func trackMyAdBoostPhotoComponentButtonTap(component: Event.Component) {"
    ));
    assert!(content.contains("        component: component,\n"));
}

#[test]
fn test_idempotent_generation() {
    let csv = csv_file(&[
        "screen:,section:,component:,element:,action:,event_details,advertisement",
        "my_ad,feed - search_results,post,button,tap,price,ad",
        "my_ad,boost_photo,post,onboarding,view,,",
    ]);
    let dir = tempfile::tempdir().unwrap();
    let output = output_path(&dir);

    generate(csv.path(), &output);
    let first = fs::read(&output).unwrap();

    generate(csv.path(), &output);
    let second = fs::read(&output).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_duplicates_collapse_with_conflicts() {
    let csv = csv_file(&[
        "s1,sec1,c1,e1,a1,details,ad",
        "s1,sec1,c1,e1,a1,details,ad",
        "s1,sec1,c1,e1,a1,other_details,ad",
        "s1,sec1,c1,e1,a1,details,ad2",
    ]);
    let dir = tempfile::tempdir().unwrap();
    let output = output_path(&dir);

    let report = generate(csv.path(), &output);
    assert_eq!(report.functions, 2);
    assert_eq!(report.rows_parsed, 4);
    assert_eq!(report.conflicts.len(), 1);
    assert_eq!(report.conflicts[0].kept_details, "details");
    assert_eq!(report.conflicts[0].ignored_details, "other_details");
}

#[test]
fn test_header_csv_with_quotes_and_variants() {
    let csv = csv_file(&[
        "\"Screen:\",\"Section:\",\"Component:\",\"Element:\",\"Action:\",event_details,advertisement",
        "my_ad,\"feed - search_results (Лента)\",post,button,tap,,",
        ",,,,,,",
    ]);
    let dir = tempfile::tempdir().unwrap();
    let output = output_path(&dir);

    let report = generate(csv.path(), &output);
    assert_eq!(report.functions, 2);

    let content = fs::read_to_string(&output).unwrap();
    let feed = content.find("trackMyAdFeedPostButtonTap").unwrap();
    let search = content.find("trackMyAdSearchResultsPostButtonTap").unwrap();
    assert!(feed < search);
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = output_path(&dir);

    let err = generate_from_input("/nonexistent/file.csv", &output).unwrap_err();
    assert!(matches!(err, codegen::GenerateError::Source(SourceError::NotFound(_))));
    assert!(!output.exists());
}

#[test]
fn test_existing_output_survives_failed_run() {
    let dir = tempfile::tempdir().unwrap();
    let output = output_path(&dir);
    fs::create_dir_all(output.parent().unwrap()).unwrap();
    fs::write(&output, "previous").unwrap();

    assert!(generate_from_input("/nonexistent/file.csv", &output).is_err());
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
}

#[test]
fn test_origin_detection() {
    assert_eq!(
        detect_origin("analytics.csv").unwrap(),
        InputOrigin::File(PathBuf::from("analytics.csv"))
    );
    assert!(matches!(
        detect_origin("http://docs.google.com/spreadsheets/d/ABC123/edit"),
        Err(SourceError::InvalidInput(_))
    ));
    assert!(matches!(
        detect_origin("https://example.com/spreadsheet"),
        Err(SourceError::InvalidInput(_))
    ));
    assert!(matches!(
        detect_origin("https://docs.google.com/spreadsheets/d/ABC123/edit#gid=456"),
        Ok(InputOrigin::GoogleSheets(_))
    ));
}

#[test]
fn test_open_source_reads_file() {
    let csv = csv_file(&["my_ad,boost_photo,post,onboarding,view"]);
    let source = open_source(csv.path().to_str().unwrap(), &SheetsOptions::default()).unwrap();
    assert!(source.describe().contains(".csv"));

    let plan = codegen::plan(source.as_ref()).unwrap();
    assert_eq!(plan.function_count(), 1);

    let direct = codegen::plan(&FileInputSource::new(csv.path())).unwrap();
    assert_eq!(direct.document, plan.document);
}
