//! Numeric parsing utilities.

use std::sync::LazyLock;

use dq_model::Cell;
use regex::Regex;

/// Strict decimal-number grammar used by type inference: an optional sign,
/// digits, and an optional fractional part. No exponents, no thousands
/// separators.
static STRICT_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?\d+(\.\d+)?$").expect("valid regex"));

/// True if `value` matches the strict decimal-number grammar.
pub fn is_strict_number(value: &str) -> bool {
    STRICT_NUMBER_REGEX.is_match(value.trim())
}

/// Parses a string as a finite f64, returning None for empty, invalid or
/// non-finite input.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// The numeric reading of a cell: the payload of a finite `Number`, or a
/// parsed `Text`. Null and unparseable cells read as None.
pub fn numeric_value(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Null => None,
        Cell::Number(n) => n.is_finite().then_some(*n),
        Cell::Text(s) => parse_f64(s),
    }
}

/// Formats a floating-point number for output. Whole numbers print without
/// a fractional part (`10`, not `10.0`).
pub fn format_numeric(v: f64) -> String {
    format!("{v}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_grammar_accepts_signed_decimals() {
        assert!(is_strict_number("42"));
        assert!(is_strict_number("-3.5"));
        assert!(is_strict_number("+7"));
        assert!(is_strict_number(" 10.25 "));
    }

    #[test]
    fn strict_grammar_rejects_loose_forms() {
        assert!(!is_strict_number("1e5"));
        assert!(!is_strict_number("1,000"));
        assert!(!is_strict_number(".5"));
        assert!(!is_strict_number("5."));
        assert!(!is_strict_number("abc"));
        assert!(!is_strict_number(""));
    }

    #[test]
    fn parse_rejects_non_finite() {
        assert_eq!(parse_f64("inf"), None);
        assert_eq!(parse_f64("NaN"), None);
        assert_eq!(parse_f64("2.5"), Some(2.5));
        assert_eq!(parse_f64(""), None);
    }

    #[test]
    fn cells_read_numerically() {
        assert_eq!(numeric_value(&Cell::Number(1.5)), Some(1.5));
        assert_eq!(numeric_value(&Cell::Text(" 3 ".to_string())), Some(3.0));
        assert_eq!(numeric_value(&Cell::Text("x".to_string())), None);
        assert_eq!(numeric_value(&Cell::Number(f64::NAN)), None);
        assert_eq!(numeric_value(&Cell::Null), None);
    }

    #[test]
    fn format_drops_fractional_part_of_whole_numbers() {
        assert_eq!(format_numeric(10.0), "10");
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(10.5), "10.5");
        assert_eq!(format_numeric(2.333333333333333), "2.333333333333333");
    }
}
