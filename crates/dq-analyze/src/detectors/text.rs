//! Suspicious long-text detection on string columns.

use std::collections::BTreeMap;

use dq_model::{Cell, ColumnProfile, ColumnType, Dataset, Issue, IssueKind, IssueScope, Severity};
use serde_json::json;

use crate::config::AnalyzerConfig;
use crate::detectors::ROW_SAMPLE_CAP;

/// Example values listed per issue.
const EXAMPLE_CAP: usize = 3;

pub(crate) fn check(
    dataset: &Dataset,
    schema: &BTreeMap<String, ColumnProfile>,
    config: &AnalyzerConfig,
) -> Vec<Issue> {
    let mut issues = Vec::new();
    for column in &dataset.columns {
        if schema.get(column).map(|p| p.inferred_type) != Some(ColumnType::Text) {
            continue;
        }

        let mut rows = Vec::new();
        let mut examples = Vec::new();
        for (idx, record) in dataset.records.iter().enumerate() {
            let Cell::Text(value) = record.get(column) else {
                continue;
            };
            if value.chars().count() > config.text_length_threshold {
                rows.push(idx);
                if examples.len() < EXAMPLE_CAP {
                    examples.push(value.clone());
                }
            }
        }
        if rows.is_empty() {
            continue;
        }

        let count = rows.len();
        rows.truncate(ROW_SAMPLE_CAP);
        issues.push(
            Issue::new(
                IssueKind::SuspiciousText,
                IssueScope::Column,
                Severity::Low,
                0.6,
            )
            .with_column(column.clone())
            .with_rows(rows)
            .with_evidence(json!({ "count": count, "examples": examples }))
            .with_suggested_fix("truncate_or_clean"),
        );
    }
    issues
}
