//! Date-parse failure detection on datetime columns.

use std::collections::BTreeMap;

use dq_core::is_valid_date;
use dq_model::{Cell, ColumnProfile, ColumnType, Dataset, Issue, IssueKind, IssueScope, Severity};
use serde_json::json;

use crate::config::AnalyzerConfig;

pub(crate) fn check(
    dataset: &Dataset,
    schema: &BTreeMap<String, ColumnProfile>,
    config: &AnalyzerConfig,
) -> Vec<Issue> {
    let mut issues = Vec::new();
    for column in &dataset.columns {
        if schema.get(column).map(|p| p.inferred_type) != Some(ColumnType::Datetime) {
            continue;
        }

        // First non-null values, up to the sample cap.
        let sample: Vec<String> = dataset
            .records
            .iter()
            .filter_map(|record| match record.get(column) {
                Cell::Null => None,
                Cell::Number(n) => Some(format!("{n}")),
                Cell::Text(s) => {
                    let trimmed = s.trim();
                    (!trimmed.is_empty()).then(|| trimmed.to_string())
                }
            })
            .take(config.date_sample_cap)
            .collect();
        if sample.is_empty() {
            continue;
        }

        let failures = sample.iter().filter(|value| !is_valid_date(value)).count();
        let fail_fraction = failures as f64 / sample.len() as f64;
        if fail_fraction <= 0.1 {
            continue;
        }

        let severity = if fail_fraction > 0.5 {
            Severity::High
        } else {
            Severity::Medium
        };
        issues.push(
            Issue::new(IssueKind::DateParse, IssueScope::Column, severity, fail_fraction)
                .with_column(column.clone())
                .with_evidence(json!({
                    "fail_fraction": fail_fraction,
                    "sampled": sample.len(),
                }))
                .with_suggested_fix("parse_with_formats"),
        );
    }
    issues
}
