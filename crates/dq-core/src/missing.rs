//! Missing-value rules shared by the profiler, detectors and transformations.

use dq_model::Cell;

/// Text tokens treated as missing, compared after trimming and lowercasing.
const MISSING_TOKENS: [&str; 4] = ["na", "n/a", "-", "null"];

/// True for the empty string and the conventional missing-value tokens.
pub fn is_missing_token(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return true;
    }
    let lowered = trimmed.to_ascii_lowercase();
    MISSING_TOKENS.contains(&lowered.as_str())
}

/// Missing test for a cell: null, NaN-typed number, or a missing token.
pub fn is_missing_cell(cell: &Cell) -> bool {
    match cell {
        Cell::Null => true,
        Cell::Number(n) => n.is_nan(),
        Cell::Text(s) => is_missing_token(s),
    }
}
