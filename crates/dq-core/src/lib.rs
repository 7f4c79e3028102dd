//! Leaf algorithms for the dq data-quality engine.
//!
//! Everything here is pure and synchronous: missing-value rules, strict
//! numeric and date parsing, nearest-rank order statistics, column type
//! inference and schema profiling. Both the analyzer and the
//! transformations build on these so their semantics never drift apart.

pub mod datetime;
pub mod infer;
pub mod missing;
pub mod numeric;
pub mod profiler;
pub mod stats;

pub use datetime::{DatePrecision, is_valid_date, parse_date};
pub use infer::{TYPE_SAMPLE_CAP, infer_column_type};
pub use missing::{is_missing_cell, is_missing_token};
pub use numeric::{format_numeric, is_strict_number, numeric_value, parse_f64};
pub use profiler::build_schema;
pub use stats::{IqrBounds, MIN_IQR_SAMPLE, mean, median_nearest_rank, quantile_nearest_rank};
