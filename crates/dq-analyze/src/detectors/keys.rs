//! Primary-key candidate detection: columns whose distinct non-missing
//! values nearly cover the row count. Multiple columns may qualify.

use std::collections::BTreeMap;

use dq_model::{ColumnProfile, Dataset, Issue, IssueKind, IssueScope, Severity};
use serde_json::json;

use crate::config::AnalyzerConfig;

pub(crate) fn check(
    dataset: &Dataset,
    schema: &BTreeMap<String, ColumnProfile>,
    config: &AnalyzerConfig,
) -> Vec<Issue> {
    let total = dataset.row_count();
    if total == 0 {
        return Vec::new();
    }

    let mut issues = Vec::new();
    for column in &dataset.columns {
        let Some(profile) = schema.get(column) else {
            continue;
        };
        let unique_fraction = profile.nunique as f64 / total as f64;
        if unique_fraction >= config.pk_uniqueness_threshold {
            issues.push(
                Issue::new(
                    IssueKind::PkCandidate,
                    IssueScope::Column,
                    Severity::Low,
                    unique_fraction,
                )
                .with_column(column.clone())
                .with_evidence(json!({ "unique_fraction": unique_fraction })),
            );
        }
    }
    issues
}
