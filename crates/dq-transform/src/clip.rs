//! IQR clipping: cap, flag or remove out-of-range numeric values.

use dq_core::{IqrBounds, numeric_value};
use dq_model::{Cell, Record};

use crate::{ClipMethod, TransformEvidence, TransformOutcome, before_sample};

/// Fences are recomputed here with the same nearest-rank quartiles the
/// outlier detector uses, so a detected outlier is always inside the set
/// this transformation acts on.
pub(crate) fn clip_outliers(
    records: &[Record],
    column: &str,
    k: f64,
    method: ClipMethod,
    flag_column: &str,
) -> TransformOutcome {
    let sample = before_sample(records, column);

    let values: Vec<f64> = records
        .iter()
        .filter_map(|record| numeric_value(record.get(column)))
        .collect();
    let Some(bounds) = IqrBounds::compute(&values, k) else {
        return TransformOutcome {
            records: records.to_vec(),
            evidence: TransformEvidence {
                before_sample: sample,
                reason: Some("not_enough_numeric".to_string()),
                ..TransformEvidence::default()
            },
        };
    };

    let mut evidence = TransformEvidence {
        before_sample: sample,
        lower: Some(bounds.lower),
        upper: Some(bounds.upper),
        ..TransformEvidence::default()
    };

    let records = match method {
        ClipMethod::Clip => {
            let mut out = records.to_vec();
            for record in &mut out {
                let Some(value) = numeric_value(record.get(column)) else {
                    continue;
                };
                if bounds.is_outlier(value) {
                    record.insert(column, Cell::Number(bounds.clamp(value)));
                    evidence.changed_count += 1;
                }
            }
            out
        }
        ClipMethod::Flag => {
            let mut out = records.to_vec();
            for record in &mut out {
                let already = matches!(record.get(flag_column), Cell::Text(s) if s == "true");
                let outlier = numeric_value(record.get(column))
                    .is_some_and(|value| bounds.is_outlier(value));
                let flag = Cell::Text((already || outlier).to_string());
                if *record.get(flag_column) != flag {
                    record.insert(flag_column, flag);
                    evidence.changed_count += 1;
                }
            }
            out
        }
        ClipMethod::Remove => {
            // Rows with non-numeric values are kept; only numeric
            // out-of-range rows are dropped.
            let kept: Vec<Record> = records
                .iter()
                .filter(|record| {
                    numeric_value(record.get(column))
                        .is_none_or(|value| !bounds.is_outlier(value))
                })
                .cloned()
                .collect();
            let removed = records.len() - kept.len();
            evidence.changed_count = removed;
            evidence.removed_count = Some(removed);
            kept
        }
    };

    TransformOutcome { records, evidence }
}
