//! IQR outlier detection on numeric columns.

use std::collections::BTreeMap;

use dq_core::{IqrBounds, numeric_value};
use dq_model::{ColumnProfile, ColumnType, Dataset, Issue, IssueKind, IssueScope, Severity};
use serde_json::json;
use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::detectors::ROW_SAMPLE_CAP;

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
        if schema.get(column).map(|p| p.inferred_type) != Some(ColumnType::Numeric) {
            continue;
        }

        // Row index and numeric reading for every coercible cell.
        let numeric: Vec<(usize, f64)> = dataset
            .records
            .iter()
            .enumerate()
            .filter_map(|(idx, record)| {
                numeric_value(record.get(column)).map(|value| (idx, value))
            })
            .collect();

        let values: Vec<f64> = numeric.iter().map(|(_, v)| *v).collect();
        let Some(bounds) = IqrBounds::compute(&values, config.outlier_iqr_k) else {
            debug!(column, count = values.len(), "skipping outlier check: too few numeric values");
            continue;
        };

        let outliers: Vec<usize> = numeric
            .iter()
            .filter(|(_, value)| bounds.is_outlier(*value))
            .map(|(idx, _)| *idx)
            .collect();
        if outliers.is_empty() {
            continue;
        }

        let score = outliers.len() as f64 / total as f64;
        let sample: Vec<usize> = outliers.iter().copied().take(ROW_SAMPLE_CAP).collect();
        issues.push(
            Issue::new(IssueKind::Outliers, IssueScope::Column, Severity::Medium, score)
                .with_column(column.clone())
                .with_rows(sample)
                .with_evidence(json!({
                    "lower": bounds.lower,
                    "upper": bounds.upper,
                    "count": outliers.len(),
                }))
                .with_suggested_fix("review_or_cap"),
        );
    }
    issues
}
