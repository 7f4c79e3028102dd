//! Corrective transformations over record sets.
//!
//! The transformation set is a closed tagged variant
//! ([`TransformKind`]): a pipeline can exhaustively reason about required
//! parameters and destructiveness without runtime type inspection.
//!
//! Contract for every variant:
//! - `apply` never mutates its input; it returns a new record sequence
//!   (remove-mode clipping returns a strict subset).
//! - `apply` is all-or-nothing: either the full eligible set is transformed
//!   or the input is returned unchanged with a `reason` in the evidence.
//! - Re-applying to already-clean data is a no-op (`changed_count == 0`).
//! - `destructive` is fixed at construction from the parameters and means
//!   "can reduce the record count".

mod clip;
mod coerce;
mod fill;

use dq_model::{Cell, DqError, Record, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fill-value strategy for [`TransformKind::FillMissing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillStrategy {
    Mean,
    Median,
    Mode,
    Constant,
}

/// How [`TransformKind::ClipOutliers`] handles out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipMethod {
    /// Cap to the nearer fence.
    Clip,
    /// Mark in a boolean flag column, leave the value alone.
    Flag,
    /// Drop rows with out-of-range numeric values.
    Remove,
}

/// Default flag column for flag-mode clipping.
pub const DEFAULT_FLAG_COLUMN: &str = "_outliers";

/// The closed set of transformation variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum TransformKind {
    CoerceNumeric {
        column: String,
    },
    CoerceDatetime {
        column: String,
    },
    FillMissing {
        column: String,
        strategy: FillStrategy,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    ClipOutliers {
        column: String,
        k: f64,
        method: ClipMethod,
        flag_column: String,
    },
}

impl TransformKind {
    pub fn column(&self) -> &str {
        match self {
            TransformKind::CoerceNumeric { column }
            | TransformKind::CoerceDatetime { column }
            | TransformKind::FillMissing { column, .. }
            | TransformKind::ClipOutliers { column, .. } => column,
        }
    }

    /// Stable snake_case operation name.
    pub fn name(&self) -> &'static str {
        match self {
            TransformKind::CoerceNumeric { .. } => "coerce_numeric",
            TransformKind::CoerceDatetime { .. } => "coerce_datetime",
            TransformKind::FillMissing { .. } => "fill_missing",
            TransformKind::ClipOutliers { .. } => "clip_outliers",
        }
    }
}

/// Structured before/after evidence returned by every `apply` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformEvidence {
    /// First values of the target column before the transformation, at
    /// most five.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub before_sample: Vec<Cell>,
    /// Cells (or, for remove mode, rows) materially changed by this call.
    pub changed_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filled_value: Option<Cell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_count: Option<usize>,
    /// Why the call was a no-op, when it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A new record sequence plus the evidence describing the edit.
#[derive(Debug, Clone)]
pub struct TransformOutcome {
    pub records: Vec<Record>,
    pub evidence: TransformEvidence,
}

/// A configured, stateless transformation. Configured once, applied as
/// often as needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    pub id: String,
    #[serde(flatten)]
    kind: TransformKind,
    destructive: bool,
}

impl Transformation {
    /// Validate parameters and fix the destructive flag.
    ///
    /// Misconfiguration (a constant fill without a value, a non-positive
    /// fence multiplier, an empty column name) is a hard error here; it is
    /// never deferred to `apply`.
    pub fn new(kind: TransformKind) -> Result<Self> {
        if kind.column().trim().is_empty() {
            return Err(DqError::Config("transformation column must be non-empty".into()));
        }
        match &kind {
            TransformKind::FillMissing {
                strategy: FillStrategy::Constant,
                value: None,
                ..
            } => {
                return Err(DqError::Config(
                    "fill_missing with constant strategy requires a value".into(),
                ));
            }
            TransformKind::ClipOutliers { k, flag_column, .. } => {
                if !k.is_finite() || *k <= 0.0 {
                    return Err(DqError::Config(format!(
                        "clip_outliers k must be positive, got {k}"
                    )));
                }
                if flag_column.trim().is_empty() {
                    return Err(DqError::Config("clip_outliers flag column must be non-empty".into()));
                }
            }
            _ => {}
        }

        // Destructive iff the variant can drop rows; fixed here, never
        // re-inferred from data.
        let destructive = matches!(
            kind,
            TransformKind::ClipOutliers {
                method: ClipMethod::Remove,
                ..
            }
        );
        let id = format!("{}:{}", kind.name(), kind.column());
        Ok(Self { id, kind, destructive })
    }

    pub fn coerce_numeric(column: impl Into<String>) -> Result<Self> {
        Self::new(TransformKind::CoerceNumeric { column: column.into() })
    }

    pub fn coerce_datetime(column: impl Into<String>) -> Result<Self> {
        Self::new(TransformKind::CoerceDatetime { column: column.into() })
    }

    pub fn fill_missing(
        column: impl Into<String>,
        strategy: FillStrategy,
        value: Option<String>,
    ) -> Result<Self> {
        Self::new(TransformKind::FillMissing {
            column: column.into(),
            strategy,
            value,
        })
    }

    pub fn clip_outliers(
        column: impl Into<String>,
        k: f64,
        method: ClipMethod,
        flag_column: Option<String>,
    ) -> Result<Self> {
        Self::new(TransformKind::ClipOutliers {
            column: column.into(),
            k,
            method,
            flag_column: flag_column.unwrap_or_else(|| DEFAULT_FLAG_COLUMN.to_string()),
        })
    }

    pub fn kind(&self) -> &TransformKind {
        &self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// True iff this transformation can reduce the record count.
    pub fn destructive(&self) -> bool {
        self.destructive
    }

    /// Parameters as a structured payload, for audit logs.
    pub fn params(&self) -> serde_json::Value {
        serde_json::to_value(&self.kind).unwrap_or(serde_json::Value::Null)
    }

    /// Apply this transformation to a record set.
    ///
    /// The input is never mutated; the returned sequence is freshly built.
    pub fn apply(&self, records: &[Record]) -> TransformOutcome {
        let outcome = match &self.kind {
            TransformKind::CoerceNumeric { column } => coerce::coerce_numeric(records, column),
            TransformKind::CoerceDatetime { column } => coerce::coerce_datetime(records, column),
            TransformKind::FillMissing {
                column,
                strategy,
                value,
            } => fill::fill_missing(records, column, *strategy, value.as_deref()),
            TransformKind::ClipOutliers {
                column,
                k,
                method,
                flag_column,
            } => clip::clip_outliers(records, column, *k, *method, flag_column),
        };
        debug!(
            transform = self.name(),
            column = self.kind.column(),
            changed = outcome.evidence.changed_count,
            reason = outcome.evidence.reason.as_deref(),
            "transformation applied"
        );
        outcome
    }
}

/// First values of `column`, at most five, for before/after evidence.
pub(crate) fn before_sample(records: &[Record], column: &str) -> Vec<Cell> {
    records
        .iter()
        .take(5)
        .map(|record| record.get(column).clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destructive_is_fixed_by_method() {
        let remove =
            Transformation::clip_outliers("n", 1.5, ClipMethod::Remove, None).expect("valid");
        assert!(remove.destructive());
        let clip = Transformation::clip_outliers("n", 1.5, ClipMethod::Clip, None).expect("valid");
        assert!(!clip.destructive());
        let flag = Transformation::clip_outliers("n", 1.5, ClipMethod::Flag, None).expect("valid");
        assert!(!flag.destructive());
    }

    #[test]
    fn constant_fill_requires_a_value() {
        assert!(Transformation::fill_missing("x", FillStrategy::Constant, None).is_err());
        assert!(
            Transformation::fill_missing("x", FillStrategy::Constant, Some("0".into())).is_ok()
        );
    }

    #[test]
    fn non_positive_k_is_rejected() {
        assert!(Transformation::clip_outliers("n", 0.0, ClipMethod::Clip, None).is_err());
        assert!(Transformation::clip_outliers("n", -1.5, ClipMethod::Clip, None).is_err());
    }

    #[test]
    fn empty_column_is_rejected() {
        assert!(Transformation::coerce_numeric("  ").is_err());
    }

    #[test]
    fn params_carry_the_variant_tag() {
        let t = Transformation::fill_missing("age", FillStrategy::Mean, None).expect("valid");
        let params = t.params();
        assert_eq!(params["name"], "fill_missing");
        assert_eq!(params["column"], "age");
        assert_eq!(params["strategy"], "mean");
        assert_eq!(t.id, "fill_missing:age");
    }
}
