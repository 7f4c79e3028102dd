//! Column type inference from sampled values.

use dq_model::{Cell, ColumnType};

use crate::datetime::is_valid_date;
use crate::numeric::is_strict_number;

/// Default sample cap for type inference.
pub const TYPE_SAMPLE_CAP: usize = 300;

/// Fraction of a sample that must classify as a type to win.
const TYPE_RATIO_THRESHOLD: f64 = 0.9;

/// Classify a column from its raw values.
///
/// Null cells and empty strings are dropped first; a column with nothing
/// left is `empty`. At most `sample_cap` values are examined, in row order.
/// The date test runs before the numeric test: an ambiguous column that
/// parses both ways is a date column. That ordering is a deliberate
/// tie-break and must not be swapped.
pub fn infer_column_type(values: &[&Cell], sample_cap: usize) -> ColumnType {
    let sample: Vec<String> = values
        .iter()
        .filter_map(|cell| match cell {
            Cell::Null => None,
            Cell::Number(n) => Some(format!("{n}")),
            Cell::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        })
        .take(sample_cap)
        .collect();

    if sample.is_empty() {
        return ColumnType::Empty;
    }

    let total = sample.len() as f64;

    let date_hits = sample.iter().filter(|v| is_valid_date(v)).count();
    if date_hits as f64 / total >= TYPE_RATIO_THRESHOLD {
        return ColumnType::Datetime;
    }

    let num_hits = sample.iter().filter(|v| is_strict_number(v)).count();
    if num_hits as f64 / total >= TYPE_RATIO_THRESHOLD {
        return ColumnType::Numeric;
    }

    ColumnType::Text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<Cell> {
        values.iter().map(|v| Cell::Text((*v).to_string())).collect()
    }

    fn infer(values: &[Cell]) -> ColumnType {
        let refs: Vec<&Cell> = values.iter().collect();
        infer_column_type(&refs, TYPE_SAMPLE_CAP)
    }

    #[test]
    fn all_null_column_is_empty() {
        let values = vec![Cell::Null, Cell::Text("  ".to_string()), Cell::Null];
        assert_eq!(infer(&values), ColumnType::Empty);
    }

    #[test]
    fn numeric_column() {
        assert_eq!(infer(&cells(&["1", "2.5", "-3", "+4"])), ColumnType::Numeric);
    }

    #[test]
    fn datetime_column() {
        assert_eq!(
            infer(&cells(&["2024-01-01", "2024-02-15", "2024-03-20"])),
            ColumnType::Datetime
        );
    }

    #[test]
    fn year_column_stays_numeric() {
        // Bare four-digit values must not be read as dates.
        assert_eq!(infer(&cells(&["1999", "2000", "2001"])), ColumnType::Numeric);
    }

    #[test]
    fn mixed_column_is_string() {
        assert_eq!(infer(&cells(&["1", "two", "3", "four"])), ColumnType::Text);
    }

    #[test]
    fn minority_dirt_below_threshold_keeps_type() {
        // 9 of 10 numeric values is exactly the 0.9 threshold.
        let mut values = vec!["x".to_string()];
        values.extend((1..=9).map(|n| n.to_string()));
        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        assert_eq!(infer(&cells(&refs)), ColumnType::Numeric);
    }

    #[test]
    fn sample_cap_bounds_the_scan() {
        // First 3 values are dates, the rest would flip the verdict if read.
        let mut values = cells(&["2024-01-01", "2024-01-02", "2024-01-03"]);
        values.extend(cells(&["x", "y", "z"]));
        let refs: Vec<&Cell> = values.iter().collect();
        assert_eq!(infer_column_type(&refs, 3), ColumnType::Datetime);
    }
}
