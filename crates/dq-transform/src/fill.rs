//! Missing-value imputation.

use std::collections::HashMap;

use dq_core::{is_missing_cell, mean, median_nearest_rank, numeric_value};
use dq_model::{Cell, Record};

use crate::{FillStrategy, TransformEvidence, TransformOutcome, before_sample};

/// Replace every missing cell of `column` with one fill value computed from
/// the non-missing values. When no fill value can be derived (no numeric
/// values for mean/median, no values at all for mode) the input is returned
/// unchanged with a reason.
pub(crate) fn fill_missing(
    records: &[Record],
    column: &str,
    strategy: FillStrategy,
    constant: Option<&str>,
) -> TransformOutcome {
    let sample = before_sample(records, column);

    let fill = match strategy {
        FillStrategy::Mean => numeric_fill(records, column, mean),
        FillStrategy::Median => numeric_fill(records, column, median_nearest_rank),
        FillStrategy::Mode => mode_fill(records, column),
        FillStrategy::Constant => constant.map(|v| Cell::Text(v.to_string())),
    };
    let Some(fill) = fill else {
        return TransformOutcome {
            records: records.to_vec(),
            evidence: TransformEvidence {
                before_sample: sample,
                reason: Some("no_fill_value".to_string()),
                ..TransformEvidence::default()
            },
        };
    };

    let mut out = records.to_vec();
    let mut changed = 0usize;
    for record in &mut out {
        if is_missing_cell(record.get(column)) {
            record.insert(column, fill.clone());
            changed += 1;
        }
    }

    TransformOutcome {
        records: out,
        evidence: TransformEvidence {
            before_sample: sample,
            changed_count: changed,
            filled_value: Some(fill),
            ..TransformEvidence::default()
        },
    }
}

/// A statistic over the numeric readings of the non-missing values.
fn numeric_fill(
    records: &[Record],
    column: &str,
    statistic: fn(&[f64]) -> Option<f64>,
) -> Option<Cell> {
    let values: Vec<f64> = records
        .iter()
        .map(|record| record.get(column))
        .filter(|cell| !is_missing_cell(cell))
        .filter_map(numeric_value)
        .collect();
    statistic(&values).map(Cell::Number)
}

/// The most frequent raw value under literal equality; ties go to the value
/// seen first.
fn mode_fill(records: &[Record], column: &str) -> Option<Cell> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut cells: HashMap<String, Cell> = HashMap::new();
    let mut order = 0usize;
    for record in records {
        let cell = record.get(column);
        if is_missing_cell(cell) {
            continue;
        }
        let Some(literal) = cell.to_literal() else {
            continue;
        };
        let entry = counts.entry(literal.clone()).or_insert_with(|| {
            order += 1;
            (0, order)
        });
        entry.0 += 1;
        cells.entry(literal).or_insert_with(|| cell.clone());
    }

    let (literal, _) = counts
        .into_iter()
        .max_by(|(_, (count_a, order_a)), (_, (count_b, order_b))| {
            count_a.cmp(count_b).then(order_b.cmp(order_a))
        })?;
    cells.remove(&literal)
}
