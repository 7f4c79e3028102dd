//! Data-quality issues emitted by the detectors.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::ColumnProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// What part of the dataset an issue refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueScope {
    Dataset,
    Column,
    Row,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingValues,
    SparseRow,
    DuplicateRows,
    PkCandidate,
    Outliers,
    DateParse,
    CategoricalConsistency,
    SuspiciousText,
}

impl IssueKind {
    /// Stable snake_case name, used for issue-id slugs.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::MissingValues => "missing_values",
            IssueKind::SparseRow => "sparse_row",
            IssueKind::DuplicateRows => "duplicate_rows",
            IssueKind::PkCandidate => "pk_candidate",
            IssueKind::Outliers => "outliers",
            IssueKind::DateParse => "date_parse",
            IssueKind::CategoricalConsistency => "categorical_consistency",
            IssueKind::SuspiciousText => "suspicious_text",
        }
    }
}

/// One detected data-quality defect.
///
/// Issues are recreated fresh on every analyzer run; ids are unique within a
/// run only. Row samples are capped by the emitting detector to bound
/// payload size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Run-unique identifier, assigned by the analyzer.
    pub id: String,
    pub scope: IssueScope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Sampled row indices, in row order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<usize>,
    #[serde(rename = "issue_type")]
    pub kind: IssueKind,
    pub severity: Severity,
    /// Confidence/impact score in `[0, 1]`.
    pub score: f64,
    /// Structured payload justifying the issue.
    pub evidence: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Issue {
    /// Create an issue with an empty id; the analyzer assigns ids when it
    /// aggregates detector output. `score` is clamped into `[0, 1]`.
    pub fn new(kind: IssueKind, scope: IssueScope, severity: Severity, score: f64) -> Self {
        Self {
            id: String::new(),
            scope,
            column: None,
            rows: Vec::new(),
            kind,
            severity,
            score: score.clamp(0.0, 1.0),
            evidence: serde_json::Value::Null,
            suggested_fix: None,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_rows(mut self, rows: Vec<usize>) -> Self {
        self.rows = rows;
        self
    }

    #[must_use]
    pub fn with_evidence(mut self, evidence: serde_json::Value) -> Self {
        self.evidence = evidence;
        self
    }

    #[must_use]
    pub fn with_suggested_fix(mut self, fix: impl Into<String>) -> Self {
        self.suggested_fix = Some(fix.into());
        self
    }
}

/// Output of one full analyzer run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Per-column profiles keyed by column name.
    pub schema: BTreeMap<String, ColumnProfile>,
    /// All detected issues, in detector emission order.
    pub issues: Vec<Issue>,
}

impl AnalysisReport {
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .count()
    }

    pub fn has_high_severity(&self) -> bool {
        self.count_by_severity(Severity::High) > 0
    }

    /// Issues attached to one column, in emission order.
    pub fn issues_for_column<'a>(&'a self, column: &str) -> Vec<&'a Issue> {
        self.issues
            .iter()
            .filter(|issue| issue.column.as_deref() == Some(column))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_is_clamped() {
        let issue = Issue::new(IssueKind::Outliers, IssueScope::Column, Severity::Medium, 1.7);
        assert_eq!(issue.score, 1.0);
        let issue = Issue::new(IssueKind::Outliers, IssueScope::Column, Severity::Medium, -0.2);
        assert_eq!(issue.score, 0.0);
    }

    #[test]
    fn report_counts_by_severity() {
        let mut report = AnalysisReport::default();
        report.issues.push(
            Issue::new(
                IssueKind::MissingValues,
                IssueScope::Column,
                Severity::High,
                0.6,
            )
            .with_column("age"),
        );
        report.issues.push(Issue::new(
            IssueKind::DuplicateRows,
            IssueScope::Dataset,
            Severity::High,
            0.9,
        ));
        report.issues.push(
            Issue::new(
                IssueKind::PkCandidate,
                IssueScope::Column,
                Severity::Low,
                0.99,
            )
            .with_column("id"),
        );
        assert_eq!(report.count_by_severity(Severity::High), 2);
        assert_eq!(report.count_by_severity(Severity::Low), 1);
        assert!(report.has_high_severity());
        assert_eq!(report.issues_for_column("age").len(), 1);
    }

    #[test]
    fn issue_type_serializes_snake_case() {
        let issue = Issue::new(
            IssueKind::CategoricalConsistency,
            IssueScope::Column,
            Severity::Medium,
            0.6,
        );
        let json = serde_json::to_value(&issue).expect("serialize");
        assert_eq!(json["issue_type"], "categorical_consistency");
        assert_eq!(json["scope"], "column");
        assert_eq!(json["severity"], "medium");
    }
}
