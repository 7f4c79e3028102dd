//! Issue detector modules.
//!
//! Each detector is a pure function over the dataset, the schema and the
//! config, returning zero or more issues. Detectors never fail: a column
//! that cannot be processed is skipped, and no detector depends on another
//! detector's output.

pub mod categorical;
mod dates;
mod duplicates;
mod keys;
mod missing;
mod outliers;
mod text;

use std::collections::BTreeMap;

use dq_model::{ColumnProfile, Dataset, Issue};

use crate::config::AnalyzerConfig;

/// Maximum sampled row indices per dataset- or column-scope issue.
pub(crate) const ROW_SAMPLE_CAP: usize = 10;

/// Run all detectors in their fixed order.
///
/// The order affects only the listing order of the returned issues, never
/// detection itself.
pub fn run_all(
    dataset: &Dataset,
    schema: &BTreeMap<String, ColumnProfile>,
    config: &AnalyzerConfig,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    // 1. Missing values (column-level and sparse rows)
    issues.extend(missing::check(dataset, schema, config));

    // 2. Exact duplicate rows
    issues.extend(duplicates::check(dataset, schema, config));

    // 3. Primary-key candidates
    issues.extend(keys::check(dataset, schema, config));

    // 4. Numeric outliers (IQR fences)
    issues.extend(outliers::check(dataset, schema, config));

    // 5. Date-parse failures
    issues.extend(dates::check(dataset, schema, config));

    // 6. Categorical near-duplicates
    issues.extend(categorical::check(dataset, schema, config));

    // 7. Suspicious long text
    issues.extend(text::check(dataset, schema, config));

    issues
}
