//! Strict, locale-independent date/time parsing with precision preservation.
//!
//! Parsing is restricted to an explicit format list: ISO 8601 first, then a
//! small set of unambiguous conventional formats. There is no permissive
//! natural-language fallback, and a bare all-digit token of length >= 4 is
//! never a date (a year column must not be read as a date column).

use chrono::{NaiveDate, NaiveDateTime};

/// Result of parsing a date/time string, preserving partial precision
/// (e.g. `2003-12` stays year-month, it is not padded to a full date).
#[derive(Debug, Clone, PartialEq)]
pub enum DatePrecision {
    /// Full date and time.
    DateTime(NaiveDateTime),
    /// Date only.
    Date(NaiveDate),
    /// Year and month only.
    YearMonth { year: i32, month: u32 },
}

impl DatePrecision {
    /// Format to an ISO 8601 string at the parsed precision.
    pub fn to_iso8601(&self) -> String {
        match self {
            DatePrecision::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            DatePrecision::Date(d) => d.format("%Y-%m-%d").to_string(),
            DatePrecision::YearMonth { year, month } => format!("{year:04}-{month:02}"),
        }
    }
}

/// Parse a date/time string, or None if it does not match any accepted
/// format. Empty strings and bare digit runs of length >= 4 are rejected.
pub fn parse_date(value: &str) -> Option<DatePrecision> {
    let trimmed = value.trim();
    if trimmed.is_empty() || is_bare_digits(trimmed) {
        return None;
    }

    if let Some(dt) = try_parse_datetime(trimmed) {
        return Some(DatePrecision::DateTime(dt));
    }
    if let Some(d) = try_parse_date(trimmed) {
        return Some(DatePrecision::Date(d));
    }
    try_parse_year_month(trimmed)
}

/// True if `value` parses under the strict date grammar.
pub fn is_valid_date(value: &str) -> bool {
    parse_date(value).is_some()
}

/// A digit-only token of length >= 4 looks like a year or an identifier,
/// never a date.
fn is_bare_digits(value: &str) -> bool {
    value.len() >= 4 && value.chars().all(|c| c.is_ascii_digit())
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in &formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    None
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    let formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%d-%b-%Y", // 15-Jan-2024
    ];
    for fmt in &formats {
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return Some(d);
        }
    }
    None
}

fn try_parse_year_month(value: &str) -> Option<DatePrecision> {
    let (year, month) = value.split_once('-')?;
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    // Validate the month by constructing the first of it.
    NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(DatePrecision::YearMonth { year, month })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_dates_parse() {
        assert!(is_valid_date("2024-01-15"));
        assert!(is_valid_date("2024-01-15T10:30:45"));
        assert!(is_valid_date("2024-01-15 10:30"));
        assert!(is_valid_date("2024/01/15"));
        assert!(is_valid_date("15-Jan-2024"));
        assert!(is_valid_date("01/15/2024"));
    }

    #[test]
    fn bare_digit_runs_are_not_dates() {
        assert!(!is_valid_date("2024"));
        assert!(!is_valid_date("20240115"));
        assert!(!is_valid_date("1999"));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(!is_valid_date(""));
        assert!(!is_valid_date("not a date"));
        assert!(!is_valid_date("2024-13-40"));
        assert!(!is_valid_date("15"));
    }

    #[test]
    fn partial_precision_is_preserved() {
        let parsed = parse_date("2003-12").expect("year-month parses");
        assert_eq!(parsed, DatePrecision::YearMonth { year: 2003, month: 12 });
        assert_eq!(parsed.to_iso8601(), "2003-12");
    }

    #[test]
    fn normalization_is_iso8601() {
        assert_eq!(
            parse_date("01/15/2024").expect("parses").to_iso8601(),
            "2024-01-15"
        );
        assert_eq!(
            parse_date("2024-01-15T10:30:45").expect("parses").to_iso8601(),
            "2024-01-15T10:30:45"
        );
    }

    #[test]
    fn invalid_month_in_year_month_is_rejected() {
        assert!(parse_date("2024-13").is_none());
    }
}
