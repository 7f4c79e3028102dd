//! Missing-value detection: columns with too many gaps, and rows that are
//! mostly empty.

use std::collections::BTreeMap;

use dq_core::is_missing_cell;
use dq_model::{ColumnProfile, Dataset, Issue, IssueKind, IssueScope, Severity};
use serde_json::json;

use crate::config::AnalyzerConfig;

/// Missing row indices sampled per column issue.
const MISSING_ROW_SAMPLE_CAP: usize = 5;

pub(crate) fn check(
    dataset: &Dataset,
    schema: &BTreeMap<String, ColumnProfile>,
    config: &AnalyzerConfig,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    // Column level: the profile already carries full-column missing stats.
    for column in &dataset.columns {
        let Some(profile) = schema.get(column) else {
            continue;
        };
        if profile.missing_pct < config.col_missing_threshold {
            continue;
        }
        let severity = if profile.missing_pct > 0.5 {
            Severity::High
        } else {
            Severity::Medium
        };
        let sample: Vec<usize> = dataset
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| is_missing_cell(record.get(column)))
            .map(|(idx, _)| idx)
            .take(MISSING_ROW_SAMPLE_CAP)
            .collect();
        issues.push(
            Issue::new(
                IssueKind::MissingValues,
                IssueScope::Column,
                severity,
                profile.missing_pct,
            )
            .with_column(column.clone())
            .with_rows(sample)
            .with_evidence(json!({ "missing_pct": profile.missing_pct }))
            .with_suggested_fix("impute_or_drop"),
        );
    }

    // Row level: rows where at least half the cells are missing.
    let column_count = dataset.columns.len();
    if column_count == 0 {
        return issues;
    }
    for (idx, record) in dataset.records.iter().enumerate() {
        let missing = dataset
            .columns
            .iter()
            .filter(|column| is_missing_cell(record.get(column)))
            .count();
        let fraction = missing as f64 / column_count as f64;
        if fraction >= config.row_missing_threshold {
            issues.push(
                Issue::new(IssueKind::SparseRow, IssueScope::Row, Severity::High, fraction)
                    .with_rows(vec![idx])
                    .with_evidence(json!({ "missing_fraction": fraction }))
                    .with_suggested_fix("drop_or_review"),
            );
        }
    }

    issues
}
