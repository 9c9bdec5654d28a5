//! Invoice rows and ledger date parsing

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::ops::RangeInclusive;

/// Date-only layouts accepted in date columns, tried in order. Two-digit
/// year layouts come last so a four-digit year is never cut short.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%d %b %Y",
    "%m/%d/%y",
    "%d-%b-%y",
    "%d %b %y",
];

/// `%Y` takes any width, so `7/20/24` would otherwise read as year 24
const VALID_YEARS: RangeInclusive<i32> = 1000..=9999;

/// Date-time layouts accepted in date columns; the time part is dropped
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// One row of the invoice ledger. Read once per run, never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRecord {
    pub invoice_no: String,
    pub name: String,
    pub email: String,
    /// Passed through verbatim into the message body
    pub amount: String,
    pub due_date: Option<NaiveDate>,
    pub reminder_date: Option<NaiveDate>,
    pub has_paid: Option<String>,
}

/// Parse a ledger date cell.
///
/// Returns `None` when the value matches none of the accepted layouts.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .find(has_valid_year)
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .filter_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
                .find(has_valid_year)
        })
}

fn has_valid_year(date: &NaiveDate) -> bool {
    VALID_YEARS.contains(&date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_date("2024-07-20"), Some(ymd(2024, 7, 20)));
        assert_eq!(parse_date("  2024-07-20 "), Some(ymd(2024, 7, 20)));
    }

    #[test]
    fn test_parse_us_slash_date() {
        assert_eq!(parse_date("7/20/2024"), Some(ymd(2024, 7, 20)));
        assert_eq!(parse_date("07/02/2024"), Some(ymd(2024, 7, 2)));
    }

    #[test]
    fn test_parse_month_name_dates() {
        assert_eq!(parse_date("20-Jul-2024"), Some(ymd(2024, 7, 20)));
        assert_eq!(parse_date("20 Jul 2024"), Some(ymd(2024, 7, 20)));
    }

    #[test]
    fn test_parse_datetime_drops_time() {
        assert_eq!(parse_date("2024-07-20 13:45:00"), Some(ymd(2024, 7, 20)));
        assert_eq!(parse_date("2024-07-20T00:00:00"), Some(ymd(2024, 7, 20)));
    }

    #[test]
    fn test_parse_two_digit_year() {
        assert_eq!(parse_date("7/20/24"), Some(ymd(2024, 7, 20)));
        assert_eq!(parse_date("12/31/26"), Some(ymd(2026, 12, 31)));
        assert_eq!(parse_date("20-Jul-24"), Some(ymd(2024, 7, 20)));
        assert_eq!(parse_date("20 Jul 24"), Some(ymd(2024, 7, 20)));
        // Year-first with two digits is ambiguous
        assert_eq!(parse_date("24-07-20"), None);
    }

    #[test]
    fn test_parse_rejects_short_year_datetime() {
        assert_eq!(parse_date("24-07-20 10:00:00"), None);
    }

    #[test]
    fn test_parse_invalid_dates() {
        assert_eq!(parse_date("next week"), None);
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date(""), None);
    }
}
