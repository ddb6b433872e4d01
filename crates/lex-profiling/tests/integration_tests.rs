//! Integration tests for column profiling.
//!
//! These tests verify end-to-end behavior: frames in, ordered summaries out,
//! plus the file loader and the side-by-side sheet writer.

use lex_profiling::{
    ColumnType, Measure, ProfileConfig, ProfileReport, SortBy, SummaryMode, SummaryWriter,
    TableProfiler, load_table, output_path, profile_table,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

// ============================================================================
// Helper Functions
// ============================================================================

fn rows(report: &ProfileReport, column: &str) -> Vec<(Option<String>, Measure)> {
    report
        .summary(column)
        .expect("column should be profiled")
        .rows
        .iter()
        .map(|r| (r.label.clone(), r.measure))
        .collect()
}

fn label(s: &str) -> Option<String> {
    Some(s.to_string())
}

fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write fixture");
    path
}

// ============================================================================
// Profiling Scenarios
// ============================================================================

#[test]
fn test_integer_column_exact_counts() {
    let df = df!["n" => [1i64, 2, 3, 4]].unwrap();
    let report = profile_table(&df, SortBy::Index, false).unwrap();

    let profile = report.get("n").unwrap();
    assert_eq!(profile.column_type, ColumnType::Integer);
    assert_eq!(profile.summary.mode, SummaryMode::ValueCounts);
    assert_eq!(
        rows(&report, "n"),
        vec![
            (label("1"), Measure::Count(1)),
            (label("2"), Measure::Count(1)),
            (label("3"), Measure::Count(1)),
            (label("4"), Measure::Count(1)),
            (None, Measure::Count(0)),
        ]
    );
}

#[test]
fn test_currency_column_low_cardinality() {
    let df = df!["price" => ["$1,000", "$2,000", "€500"]].unwrap();
    let report = profile_table(&df, SortBy::Index, true).unwrap();

    let profile = report.get("price").unwrap();
    assert_eq!(profile.column_type, ColumnType::Currency);
    assert_eq!(profile.summary.mode, SummaryMode::ValueCounts);
    assert_eq!(profile.summary.labels(), vec!["500", "1000", "2000"]);
    assert_eq!(profile.summary.measure_column, "pct|price");
    assert!((profile.summary.total() - 1.0).abs() < 1e-9);
}

#[test]
fn test_continuous_float_column_binned() {
    let values: Vec<f64> = (0..15).map(|i| i as f64 * 100.0 / 14.0).collect();
    let df = df!["reading" => values].unwrap();
    let report = profile_table(&df, SortBy::Index, true).unwrap();

    let profile = report.get("reading").unwrap();
    assert_eq!(profile.column_type, ColumnType::Float);

    let summary = &profile.summary;
    assert_eq!(summary.mode, SummaryMode::Binned);
    assert_eq!(summary.label_column, "bins|reading");
    assert_eq!(summary.rows.len(), 11);
    assert_eq!(summary.rows[0].label, None);
    assert_eq!(summary.rows[0].measure, Measure::Fraction(0.0));
    assert_eq!(summary.rows[1].label, label("0 to <10"));
    assert_eq!(summary.rows[10].label, label("90 to <100"));
    assert!((summary.total() - 1.0).abs() < 1e-9);
}

#[test]
fn test_all_missing_column() {
    let df = df!["blank" => [None::<&str>, None, None, None, None]].unwrap();
    let report = profile_table(&df, SortBy::Index, false).unwrap();

    let profile = report.get("blank").unwrap();
    assert_eq!(profile.column_type, ColumnType::Unknown);
    assert_eq!(profile.missing_count, 5);
    assert_eq!(rows(&report, "blank"), vec![(None, Measure::Count(5))]);
}

#[test]
fn test_string_column_sorted_by_count() {
    let df = df!["fruit" => ["apple", "banana", "apple", "cherry"]].unwrap();
    let report = profile_table(&df, SortBy::Value, false).unwrap();

    assert_eq!(report.get("fruit").unwrap().column_type, ColumnType::String);
    assert_eq!(
        rows(&report, "fruit"),
        vec![
            (label("apple"), Measure::Count(2)),
            (label("banana"), Measure::Count(1)),
            (label("cherry"), Measure::Count(1)),
            (None, Measure::Count(0)),
        ]
    );
}

#[test]
fn test_profile_mixed_table_in_column_order() {
    let df = df![
        "id" => (1..=12i64).collect::<Vec<_>>(),
        "city" => ["Oslo", "Rome", "Oslo", "Lima", "Rome", "Oslo", "Lima", "Oslo", "Rome", "Oslo", "Lima", "Oslo"],
        "delta" => [-1.0f64, -2.0, -0.5, -3.0, -1.0, -2.0, -0.5, -3.0, -1.0, -2.0, -0.5, -3.0],
    ]
    .unwrap();

    let report = TableProfiler::new(ProfileConfig::default())
        .profile(&df)
        .unwrap();

    assert_eq!(report.column_names(), vec!["id", "city", "delta"]);
    // 12 distinct ids -> bins
    assert_eq!(report.summary("id").unwrap().mode, SummaryMode::Binned);
    assert_eq!(report.summary("city").unwrap().mode, SummaryMode::ValueCounts);
    // Negative-sum numbers fall through the float check into currency
    assert_eq!(report.get("delta").unwrap().column_type, ColumnType::Currency);
    assert_eq!(report.summary("delta").unwrap().len(), 5);
}

#[test]
fn test_numeric_column_with_missing_values() {
    let df = df!["score" => [Some(1.5f64), None, Some(2.5), None]].unwrap();
    let report = profile_table(&df, SortBy::Index, true).unwrap();

    let profile = report.get("score").unwrap();
    assert_eq!(profile.column_type, ColumnType::Float);
    assert_eq!(profile.summary.missing(), Some(Measure::Fraction(0.5)));
}

#[test]
fn test_report_serializes_to_json() {
    let df = df!["fruit" => ["apple", "pear"]].unwrap();
    let report = profile_table(&df, SortBy::Index, false).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["columns"][0]["column_type"], "string");
    assert_eq!(json["columns"][0]["summary"]["measure_column"], "count|fruit");
    assert_eq!(json["columns"][0]["summary"]["rows"][0]["measure"], 1);
}

// ============================================================================
// Loader Tests
// ============================================================================

#[test]
fn test_load_csv_reads_raw_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "sales.csv",
        "id,price,fruit,score\n1,\"$1,000\",apple,0.5\n2,\"$2,000\",banana,\n3,€500,apple,12.25\n",
    );

    let df = load_table(&path).unwrap();
    assert_eq!(df.shape(), (3, 4));
    assert_eq!(df.column("price").unwrap().dtype(), &DataType::String);

    let report = profile_table(&df, SortBy::Index, false).unwrap();
    assert_eq!(report.get("id").unwrap().column_type, ColumnType::Integer);
    assert_eq!(report.get("price").unwrap().column_type, ColumnType::Currency);
    assert_eq!(report.get("fruit").unwrap().column_type, ColumnType::String);
    assert_eq!(report.get("score").unwrap().column_type, ColumnType::Float);
    assert_eq!(report.get("score").unwrap().missing_count, 1);
}

#[test]
fn test_load_tsv() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "data.tsv", "a\tb\n1\tx\n2\ty\n");

    let df = load_table(&path).unwrap();
    assert_eq!(df.shape(), (2, 2));
}

#[test]
fn test_load_txt_prefers_tab() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "data.txt", "a\tb\n1,5\tx\n2\ty\n");

    let df = load_table(&path).unwrap();
    assert_eq!(df.shape(), (2, 2));
    assert_eq!(df.get_column_names()[0].as_str(), "a");
}

#[test]
fn test_load_txt_falls_back_to_comma() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "data.txt", "a,b,c\n1,2,3\n4,5,6\n");

    let df = load_table(&path).unwrap();
    assert_eq!(df.shape(), (2, 3));
}

#[test]
fn test_load_without_extension_uses_csv_sibling() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "table.csv", "a,b\n1,2\n");

    let df = load_table(dir.path().join("table")).unwrap();
    assert_eq!(df.shape(), (1, 2));
}

#[test]
fn test_load_without_extension_and_no_sibling() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_table(dir.path().join("nothing")).unwrap_err();
    assert_eq!(err.error_code(), "UNSUPPORTED_FORMAT");
}

// ============================================================================
// Writer Tests
// ============================================================================

#[test]
fn test_write_side_by_side_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let df = df![
        "n" => [1i64, 2, 2],
        "fruit" => ["apple", "pear", "apple"],
    ]
    .unwrap();
    let config = ProfileConfig::builder()
        .normalize(false)
        .output_dir(dir.path())
        .build()
        .unwrap();
    let report = TableProfiler::new(config.clone()).profile(&df).unwrap();

    let path = output_path(Path::new("input/fruit.csv"), &config);
    assert_eq!(path, dir.path().join("profiled_fruit.csv"));

    let written = SummaryWriter::from_config(&config)
        .write(&report, &path)
        .unwrap();
    let content = fs::read_to_string(&written).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines[0], "n,count|n,,fruit,count|fruit");
    assert_eq!(lines[1], "1,1,,apple,2");
    assert_eq!(lines[2], "2,2,,pear,1");
    assert_eq!(lines[3], ",0,,,0");
    assert_eq!(lines.len(), 4);
}

#[test]
fn test_profile_from_file_to_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let mut csv = String::from("amount\n");
    for i in 0..20 {
        csv.push_str(&format!("\"${},{:03}\"\n", i, i * 7 % 1000));
    }
    let input = write_file(dir.path(), "amounts.csv", &csv);

    let config = ProfileConfig::default();
    let df = load_table(&input).unwrap();
    let report = TableProfiler::new(config.clone()).profile(&df).unwrap();

    let profile = report.get("amount").unwrap();
    assert_eq!(profile.column_type, ColumnType::Currency);
    assert_eq!(profile.summary.mode, SummaryMode::Binned);

    let path = output_path(&input, &config);
    SummaryWriter::from_config(&config)
        .write(&report, &path)
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("bins|amount,pct|amount"));
    assert!(content.contains("\"0 to <1,913\""));
}
