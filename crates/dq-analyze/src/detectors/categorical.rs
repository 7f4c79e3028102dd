//! Categorical consistency: near-duplicate value clustering on string
//! columns.
//!
//! Similarity is normalized Levenshtein similarity over trimmed, lowercased
//! values, compared directly against `categorical_fuzzy_ratio`. Clustering
//! is greedy over first appearance order: every distinct value lands in
//! exactly one cluster or singleton.

use std::collections::{BTreeMap, HashSet};

use dq_model::{ColumnProfile, ColumnType, Dataset, Issue, IssueKind, IssueScope, Severity};
use rapidfuzz::distance::levenshtein;
use serde_json::json;
use tracing::debug;

use crate::config::AnalyzerConfig;

/// Clusters listed per issue.
const CLUSTER_SAMPLE_CAP: usize = 10;

pub(crate) fn check(
    dataset: &Dataset,
    schema: &BTreeMap<String, ColumnProfile>,
    config: &AnalyzerConfig,
) -> Vec<Issue> {
    let mut issues = Vec::new();
    for column in &dataset.columns {
        let Some(profile) = schema.get(column) else {
            continue;
        };
        if profile.inferred_type != ColumnType::Text {
            continue;
        }
        if profile.nunique > config.categorical_cardinality_cap {
            debug!(
                column,
                nunique = profile.nunique,
                "skipping categorical check: cardinality above cap"
            );
            continue;
        }

        let distinct = distinct_in_order(dataset, column);
        let clusters = cluster_values(&distinct, config.categorical_fuzzy_ratio);
        let conflated: Vec<&Vec<String>> =
            clusters.iter().filter(|cluster| cluster.len() > 1).collect();
        if conflated.is_empty() {
            continue;
        }

        let listed: Vec<&Vec<String>> =
            conflated.iter().copied().take(CLUSTER_SAMPLE_CAP).collect();
        issues.push(
            Issue::new(
                IssueKind::CategoricalConsistency,
                IssueScope::Column,
                Severity::Medium,
                0.6,
            )
            .with_column(column.clone())
            .with_evidence(json!({ "clusters": listed }))
            .with_suggested_fix("map_or_standardize"),
        );
    }
    issues
}

/// Distinct non-missing literals in first-appearance order.
fn distinct_in_order(dataset: &Dataset, column: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for record in &dataset.records {
        let cell = record.get(column);
        if dq_core::is_missing_cell(cell) {
            continue;
        }
        if let Some(literal) = cell.to_literal() {
            if seen.insert(literal.clone()) {
                ordered.push(literal);
            }
        }
    }
    ordered
}

/// Greedy single-pass clustering. Each unassigned value seeds a cluster and
/// absorbs every later unassigned value whose similarity reaches the
/// threshold. The result is a partition: no value is assigned twice, none
/// is dropped.
pub fn cluster_values(values: &[String], threshold: f64) -> Vec<Vec<String>> {
    let normalized: Vec<Vec<char>> = values
        .iter()
        .map(|v| v.trim().to_lowercase().chars().collect())
        .collect();

    let mut assigned = vec![false; values.len()];
    let mut clusters = Vec::new();
    for i in 0..values.len() {
        if assigned[i] {
            continue;
        }
        assigned[i] = true;
        let mut cluster = vec![values[i].clone()];
        for j in (i + 1)..values.len() {
            if assigned[j] {
                continue;
            }
            let similarity = levenshtein::normalized_similarity(
                normalized[i].iter().copied(),
                normalized[j].iter().copied(),
            );
            if similarity >= threshold {
                assigned[j] = true;
                cluster.push(values[j].clone());
            }
        }
        clusters.push(cluster);
    }
    clusters
}
