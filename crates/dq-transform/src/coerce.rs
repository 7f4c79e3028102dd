//! Type coercion: numeric and datetime.

use dq_core::{parse_date, parse_f64};
use dq_model::{Cell, Record};

use crate::{TransformEvidence, TransformOutcome, before_sample};

/// Convert every cell of `column` to a number, or to null when empty,
/// unparseable or NaN.
pub(crate) fn coerce_numeric(records: &[Record], column: &str) -> TransformOutcome {
    let sample = before_sample(records, column);
    let mut out = records.to_vec();
    let mut changed = 0usize;

    for record in &mut out {
        let current = record.get(column);
        let coerced = match current {
            Cell::Null => Cell::Null,
            Cell::Number(n) if n.is_finite() => Cell::Number(*n),
            Cell::Number(_) => Cell::Null,
            Cell::Text(s) => match parse_f64(s) {
                Some(n) => Cell::Number(n),
                None => Cell::Null,
            },
        };
        if coerced != *current {
            record.insert(column, coerced);
            changed += 1;
        }
    }

    TransformOutcome {
        records: out,
        evidence: TransformEvidence {
            before_sample: sample,
            changed_count: changed,
            ..TransformEvidence::default()
        },
    }
}

/// Convert every cell of `column` to an ISO 8601 text form at its parsed
/// precision, or to null when empty or unparseable.
pub(crate) fn coerce_datetime(records: &[Record], column: &str) -> TransformOutcome {
    let sample = before_sample(records, column);
    let mut out = records.to_vec();
    let mut changed = 0usize;

    for record in &mut out {
        let current = record.get(column);
        let coerced = match current {
            Cell::Null => Cell::Null,
            // A numeric cell is never a date under the strict grammar.
            Cell::Number(_) => Cell::Null,
            Cell::Text(s) => match parse_date(s) {
                Some(parsed) => Cell::Text(parsed.to_iso8601()),
                None => Cell::Null,
            },
        };
        if coerced != *current {
            record.insert(column, coerced);
            changed += 1;
        }
    }

    TransformOutcome {
        records: out,
        evidence: TransformEvidence {
            before_sample: sample,
            changed_count: changed,
            ..TransformEvidence::default()
        },
    }
}
