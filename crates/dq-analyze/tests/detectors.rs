//! Detector-level tests exercising each issue kind through the public API.

use dq_analyze::{Analyzer, AnalyzerConfig, detectors};
use dq_core::TYPE_SAMPLE_CAP;
use dq_model::{Cell, ColumnType, Dataset, IssueKind, IssueScope, Record, Severity};

fn single_column(name: &str, values: Vec<Cell>) -> Dataset {
    let mut ds = Dataset::new(vec![name.to_string()]);
    for value in values {
        ds.push_record(Record::from_pairs([(name, value)]));
    }
    ds
}

fn text_cells(values: &[&str]) -> Vec<Cell> {
    values.iter().map(|v| Cell::Text((*v).to_string())).collect()
}

fn analyzer() -> Analyzer {
    Analyzer::new(AnalyzerConfig::default()).expect("default config is valid")
}

#[test]
fn missing_column_issue_severity_tracks_fraction() {
    // 3 of 10 missing -> medium; 6 of 10 -> high.
    let mut values = text_cells(&["a", "b", "c", "d", "e", "f", "g"]);
    values.extend([Cell::Null, Cell::Null, Cell::Null]);
    let report = analyzer().run(&single_column("col", values));
    let issue = report
        .issues
        .iter()
        .find(|i| i.kind == IssueKind::MissingValues)
        .expect("missing-value issue");
    assert_eq!(issue.severity, Severity::Medium);
    assert_eq!(issue.score, 0.3);
    assert_eq!(issue.rows, vec![7, 8, 9]);
    assert_eq!(issue.suggested_fix.as_deref(), Some("impute_or_drop"));

    let mut values = text_cells(&["a", "b", "c", "d"]);
    values.extend(std::iter::repeat_n(Cell::Null, 6));
    let report = analyzer().run(&single_column("col", values));
    let issue = report
        .issues
        .iter()
        .find(|i| i.kind == IssueKind::MissingValues)
        .expect("missing-value issue");
    assert_eq!(issue.severity, Severity::High);
}

#[test]
fn missing_row_sample_is_capped_at_five() {
    let values: Vec<Cell> = std::iter::repeat_n(Cell::Null, 8)
        .chain(text_cells(&["a", "b"]))
        .collect();
    let report = analyzer().run(&single_column("col", values));
    let issue = report
        .issues
        .iter()
        .find(|i| i.kind == IssueKind::MissingValues)
        .expect("missing-value issue");
    assert_eq!(issue.rows.len(), 5);
}

#[test]
fn sparse_rows_are_flagged_per_row() {
    let mut ds = Dataset::new(vec!["a".to_string(), "b".to_string()]);
    ds.push_record(Record::from_pairs([
        ("a", Cell::Text("1".to_string())),
        ("b", Cell::Text("2".to_string())),
    ]));
    // Half the cells missing reaches the 0.5 threshold.
    ds.push_record(Record::from_pairs([
        ("a", Cell::Null),
        ("b", Cell::Text("2".to_string())),
    ]));
    let report = analyzer().run(&ds);
    let sparse: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.kind == IssueKind::SparseRow)
        .collect();
    assert_eq!(sparse.len(), 1);
    assert_eq!(sparse[0].scope, IssueScope::Row);
    assert_eq!(sparse[0].severity, Severity::High);
    assert_eq!(sparse[0].rows, vec![1]);
    assert_eq!(sparse[0].score, 0.5);
}

#[test]
fn identical_rows_are_duplicates_but_one_differing_cell_is_not() {
    let mut ds = Dataset::new(vec!["a".to_string(), "b".to_string()]);
    for _ in 0..2 {
        ds.push_record(Record::from_pairs([
            ("a", Cell::Text("x".to_string())),
            ("b", Cell::Text("y".to_string())),
        ]));
    }
    ds.push_record(Record::from_pairs([
        ("a", Cell::Text("x".to_string())),
        ("b", Cell::Text("z".to_string())),
    ]));
    let report = analyzer().run(&ds);
    let issue = report
        .issues
        .iter()
        .find(|i| i.kind == IssueKind::DuplicateRows)
        .expect("duplicate issue");
    assert_eq!(issue.scope, IssueScope::Dataset);
    assert_eq!(issue.severity, Severity::High);
    assert_eq!(issue.score, 0.9);
    // Only the second copy of the identical row is flagged.
    assert_eq!(issue.rows, vec![1]);
    assert_eq!(issue.suggested_fix.as_deref(), Some("drop_or_merge"));
}

#[test]
fn pk_candidate_threshold_is_098() {
    // 99 distinct values over 100 rows -> 0.99, qualifies.
    let mut values: Vec<Cell> = (0..99).map(|n| Cell::Text(format!("id-{n}"))).collect();
    values.push(Cell::Null);
    let report = analyzer().run(&single_column("id", values));
    let issue = report
        .issues
        .iter()
        .find(|i| i.kind == IssueKind::PkCandidate)
        .expect("pk candidate");
    assert_eq!(issue.severity, Severity::Low);
    assert!((issue.score - 0.99).abs() < 1e-12);

    // 97 distinct values over 100 rows -> 0.97, does not qualify.
    let mut values: Vec<Cell> = (0..97).map(|n| Cell::Text(format!("id-{n}"))).collect();
    values.extend(text_cells(&["id-0", "id-1", "id-2"]));
    let report = analyzer().run(&single_column("id", values));
    assert!(!report.issues.iter().any(|i| i.kind == IssueKind::PkCandidate));
}

#[test]
fn outlier_above_upper_fence_is_flagged() {
    let values = text_cells(&["1", "2", "3", "4", "5", "100"]);
    let report = analyzer().run(&single_column("n", values));
    let issue = report
        .issues
        .iter()
        .find(|i| i.kind == IssueKind::Outliers)
        .expect("outlier issue");
    assert_eq!(issue.severity, Severity::Medium);
    assert_eq!(issue.rows, vec![5]);
    assert_eq!(issue.evidence["count"], 1);
    assert!((issue.score - 1.0 / 6.0).abs() < 1e-12);
    assert_eq!(issue.suggested_fix.as_deref(), Some("review_or_cap"));
}

#[test]
fn fewer_than_five_numeric_values_skip_outlier_check() {
    let values = text_cells(&["1", "2", "3", "1000"]);
    let report = analyzer().run(&single_column("n", values));
    assert!(!report.issues.iter().any(|i| i.kind == IssueKind::Outliers));
}

#[test]
fn empty_column_runs_no_typed_detectors() {
    let report = analyzer().run(&single_column("blank", vec![Cell::Null, Cell::Null]));
    assert_eq!(report.schema["blank"].inferred_type, ColumnType::Empty);
    assert!(!report.issues.iter().any(|i| {
        matches!(
            i.kind,
            IssueKind::Outliers | IssueKind::DateParse | IssueKind::CategoricalConsistency
        )
    }));
}

#[test]
fn date_parse_failures_emit_on_datetime_columns() {
    // Force the datetime type through the schema so the fail fraction can
    // exceed the emission threshold independently of inference.
    let values = text_cells(&["2024-01-01", "2024-01-02", "junk", "trash"]);
    let ds = single_column("when", values);
    let mut schema = dq_core::build_schema(&ds, TYPE_SAMPLE_CAP);
    schema.get_mut("when").expect("profiled").inferred_type = ColumnType::Datetime;

    let issues = detectors::run_all(&ds, &schema, &AnalyzerConfig::default());
    let issue = issues
        .iter()
        .find(|i| i.kind == IssueKind::DateParse)
        .expect("date-parse issue");
    assert_eq!(issue.score, 0.5);
    // Exactly 0.5 is not "more than half" failing.
    assert_eq!(issue.severity, Severity::Medium);
    assert_eq!(issue.suggested_fix.as_deref(), Some("parse_with_formats"));
}

#[test]
fn clean_datetime_column_emits_nothing() {
    let values = text_cells(&["2024-01-01", "2024-01-02", "2024-01-03"]);
    let report = analyzer().run(&single_column("when", values));
    assert_eq!(report.schema["when"].inferred_type, ColumnType::Datetime);
    assert!(!report.issues.iter().any(|i| i.kind == IssueKind::DateParse));
}

#[test]
fn categorical_near_duplicates_are_reported_once_per_column() {
    let values = text_cells(&[
        "Germany", "germany", "Gernany", "France", "Spain", "Germany", "France",
    ]);
    let report = analyzer().run(&single_column("country", values));
    let issues: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.kind == IssueKind::CategoricalConsistency)
        .collect();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].score, 0.6);
    assert_eq!(issues[0].severity, Severity::Medium);
    let clusters = issues[0].evidence["clusters"]
        .as_array()
        .expect("clusters array");
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].as_array().expect("members").len(), 3);
}

#[test]
fn high_cardinality_columns_skip_fuzzy_clustering() {
    let values: Vec<Cell> = (0..600).map(|n| Cell::Text(format!("val{n}x"))).collect();
    let report = analyzer().run(&single_column("cat", values));
    assert!(
        !report
            .issues
            .iter()
            .any(|i| i.kind == IssueKind::CategoricalConsistency)
    );
}

#[test]
fn long_text_values_are_suspicious() {
    let long = "x".repeat(1001);
    let values = text_cells(&["short", &long, "also short", &long]);
    let report = analyzer().run(&single_column("notes", values));
    let issue = report
        .issues
        .iter()
        .find(|i| i.kind == IssueKind::SuspiciousText)
        .expect("suspicious-text issue");
    assert_eq!(issue.severity, Severity::Low);
    assert_eq!(issue.score, 0.6);
    assert_eq!(issue.rows, vec![1, 3]);
    assert_eq!(issue.evidence["count"], 2);
    assert_eq!(
        issue.evidence["examples"].as_array().expect("examples").len(),
        2
    );
}

#[test]
fn exactly_threshold_length_is_not_suspicious() {
    let borderline = "x".repeat(1000);
    let report = analyzer().run(&single_column(
        "notes",
        text_cells(&["a", &borderline, "b"]),
    ));
    assert!(!report.issues.iter().any(|i| i.kind == IssueKind::SuspiciousText));
}
