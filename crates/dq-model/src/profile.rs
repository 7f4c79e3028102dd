//! Per-column schema profile produced once per analysis run.

use serde::{Deserialize, Serialize};

/// Inferred column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// No non-missing values at all.
    Empty,
    Numeric,
    Datetime,
    #[serde(rename = "string")]
    Text,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ColumnType::Empty => "empty",
            ColumnType::Numeric => "numeric",
            ColumnType::Datetime => "datetime",
            ColumnType::Text => "string",
        };
        f.write_str(name)
    }
}

/// Statistics for a single column, computed over all rows (not a sample).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub inferred_type: ColumnType,
    pub missing_count: usize,
    /// Missing fraction in `[0, 1]` over the full column.
    pub missing_pct: f64,
    /// Distinct non-missing values by literal string equality.
    pub nunique: usize,
    /// First non-missing values, at most five.
    pub example_values: Vec<String>,
}
