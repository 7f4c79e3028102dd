//! Schema profiling: one [`ColumnProfile`] per column, built once per
//! analyzer run and reused by every detector.

use std::collections::{BTreeMap, BTreeSet};

use dq_model::{ColumnProfile, Dataset};

use crate::infer::infer_column_type;
use crate::missing::is_missing_cell;

/// Maximum number of example values kept per column.
const EXAMPLE_VALUE_CAP: usize = 5;

/// Profile every column of the dataset.
///
/// Missing statistics are computed over all values, not the inference
/// sample. `nunique` counts distinct non-missing values by literal string
/// equality.
pub fn build_schema(dataset: &Dataset, type_sample_cap: usize) -> BTreeMap<String, ColumnProfile> {
    let mut schema = BTreeMap::new();
    for column in &dataset.columns {
        let values = dataset.column_values(column);

        let missing_count = values.iter().filter(|cell| is_missing_cell(cell)).count();
        let total = values.len();
        let missing_pct = if total == 0 {
            0.0
        } else {
            missing_count as f64 / total as f64
        };

        let mut distinct = BTreeSet::new();
        let mut example_values = Vec::new();
        for cell in &values {
            if is_missing_cell(cell) {
                continue;
            }
            if let Some(literal) = cell.to_literal() {
                if example_values.len() < EXAMPLE_VALUE_CAP {
                    example_values.push(literal.clone());
                }
                distinct.insert(literal);
            }
        }

        schema.insert(
            column.clone(),
            ColumnProfile {
                inferred_type: infer_column_type(&values, type_sample_cap),
                missing_count,
                missing_pct,
                nunique: distinct.len(),
                example_values,
            },
        );
    }
    schema
}

#[cfg(test)]
mod tests {
    use dq_model::{Cell, ColumnType, Record};

    use super::*;
    use crate::infer::TYPE_SAMPLE_CAP;

    fn dataset_of(column: &str, values: Vec<Cell>) -> Dataset {
        let mut ds = Dataset::new(vec![column.to_string()]);
        for value in values {
            ds.push_record(Record::from_pairs([(column, value)]));
        }
        ds
    }

    #[test]
    fn profile_counts_missing_over_all_rows() {
        let ds = dataset_of(
            "age",
            vec![
                Cell::Text("30".to_string()),
                Cell::Null,
                Cell::Text("n/a".to_string()),
                Cell::Text("41".to_string()),
            ],
        );
        let schema = build_schema(&ds, TYPE_SAMPLE_CAP);
        let profile = &schema["age"];
        assert_eq!(profile.missing_count, 2);
        assert_eq!(profile.missing_pct, 0.5);
        assert_eq!(profile.nunique, 2);
        assert_eq!(profile.inferred_type, ColumnType::Numeric);
    }

    #[test]
    fn example_values_are_first_five_non_missing() {
        let values: Vec<Cell> = (1..=8).map(|n| Cell::Text(n.to_string())).collect();
        let ds = dataset_of("n", values);
        let schema = build_schema(&ds, TYPE_SAMPLE_CAP);
        assert_eq!(
            schema["n"].example_values,
            vec!["1", "2", "3", "4", "5"]
        );
    }

    #[test]
    fn all_missing_column_profiles_as_empty() {
        let ds = dataset_of("blank", vec![Cell::Null, Cell::Null]);
        let schema = build_schema(&ds, TYPE_SAMPLE_CAP);
        let profile = &schema["blank"];
        assert_eq!(profile.inferred_type, ColumnType::Empty);
        assert_eq!(profile.missing_count, 2);
        assert_eq!(profile.nunique, 0);
        assert!(profile.example_values.is_empty());
    }
}
