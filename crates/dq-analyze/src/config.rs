//! Analyzer thresholds and sampling caps.

use dq_model::{DqError, Result};
use serde::{Deserialize, Serialize};

/// Tunable thresholds for the issue detectors. Every field can be
/// overridden independently; [`AnalyzerConfig::default`] carries the
/// standard values. The config is read-only for the duration of a run and
/// may be shared across concurrent analyses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Column missing fraction at or above which an issue is emitted.
    pub col_missing_threshold: f64,
    /// Row missing fraction at or above which a sparse-row issue is emitted.
    pub row_missing_threshold: f64,
    /// Unique fraction at or above which a column is a primary-key candidate.
    pub pk_uniqueness_threshold: f64,
    /// Tukey fence multiplier for IQR outlier bounds.
    pub outlier_iqr_k: f64,
    /// Similarity threshold for categorical near-duplicate clustering.
    pub categorical_fuzzy_ratio: f64,
    /// Values sampled for column type inference.
    pub type_sample_cap: usize,
    /// Values sampled for date-parse failure detection.
    pub date_sample_cap: usize,
    /// Distinct-value ceiling above which fuzzy clustering is skipped.
    pub categorical_cardinality_cap: usize,
    /// Text length above which a value counts as suspicious.
    pub text_length_threshold: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            col_missing_threshold: 0.2,
            row_missing_threshold: 0.5,
            pk_uniqueness_threshold: 0.98,
            outlier_iqr_k: 1.5,
            categorical_fuzzy_ratio: 0.85,
            type_sample_cap: 300,
            date_sample_cap: 200,
            categorical_cardinality_cap: 500,
            text_length_threshold: 1000,
        }
    }
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_col_missing_threshold(mut self, threshold: f64) -> Self {
        self.col_missing_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_row_missing_threshold(mut self, threshold: f64) -> Self {
        self.row_missing_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_pk_uniqueness_threshold(mut self, threshold: f64) -> Self {
        self.pk_uniqueness_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_outlier_iqr_k(mut self, k: f64) -> Self {
        self.outlier_iqr_k = k;
        self
    }

    #[must_use]
    pub fn with_categorical_fuzzy_ratio(mut self, ratio: f64) -> Self {
        self.categorical_fuzzy_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_text_length_threshold(mut self, threshold: usize) -> Self {
        self.text_length_threshold = threshold;
        self
    }

    /// Reject out-of-range settings. Misconfiguration is a hard failure at
    /// construction, never silently recovered.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("col_missing_threshold", self.col_missing_threshold),
            ("row_missing_threshold", self.row_missing_threshold),
            ("pk_uniqueness_threshold", self.pk_uniqueness_threshold),
            ("categorical_fuzzy_ratio", self.categorical_fuzzy_ratio),
        ] {
            if !(0.0..=1.0).contains(&value) || value.is_nan() {
                return Err(DqError::Config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if !self.outlier_iqr_k.is_finite() || self.outlier_iqr_k <= 0.0 {
            return Err(DqError::Config(format!(
                "outlier_iqr_k must be positive, got {}",
                self.outlier_iqr_k
            )));
        }
        for (name, value) in [
            ("type_sample_cap", self.type_sample_cap),
            ("date_sample_cap", self.date_sample_cap),
            ("categorical_cardinality_cap", self.categorical_cardinality_cap),
            ("text_length_threshold", self.text_length_threshold),
        ] {
            if value == 0 {
                return Err(DqError::Config(format!("{name} must be non-zero")));
            }
        }
        Ok(())
    }
}
