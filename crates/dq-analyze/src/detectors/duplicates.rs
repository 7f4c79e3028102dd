//! Exact duplicate-row detection.
//!
//! The whole record is one composite key: two rows are duplicates iff every
//! column compares equal. The first occurrence is canonical; every later
//! identical row is flagged.

use std::collections::{BTreeMap, HashMap};

use dq_model::{ColumnProfile, Dataset, Issue, IssueKind, IssueScope, Severity};
use serde_json::json;

use crate::config::AnalyzerConfig;
use crate::detectors::ROW_SAMPLE_CAP;

pub(crate) fn check(
    dataset: &Dataset,
    _schema: &BTreeMap<String, ColumnProfile>,
    _config: &AnalyzerConfig,
) -> Vec<Issue> {
    let mut seen: HashMap<Vec<Option<String>>, usize> = HashMap::new();
    let mut duplicate_rows = Vec::new();

    for (idx, record) in dataset.records.iter().enumerate() {
        let key: Vec<Option<String>> = dataset
            .columns
            .iter()
            .map(|column| record.get(column).to_literal())
            .collect();
        if seen.contains_key(&key) {
            duplicate_rows.push(idx);
        } else {
            seen.insert(key, idx);
        }
    }

    if duplicate_rows.is_empty() {
        return Vec::new();
    }

    let sample: Vec<usize> = duplicate_rows.iter().copied().take(ROW_SAMPLE_CAP).collect();
    vec![
        Issue::new(
            IssueKind::DuplicateRows,
            IssueScope::Dataset,
            Severity::High,
            0.9,
        )
        .with_rows(sample)
        .with_evidence(json!({ "duplicate_count": duplicate_rows.len() }))
        .with_suggested_fix("drop_or_merge"),
    ]
}
