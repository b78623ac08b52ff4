//! Tolerant date parsing with a day-before-month policy.
//!
//! Exports rarely agree on a date format: the same workbook can carry
//! `02/03/2024`, `2024-03-02` and `2 Mar 2024` in one column. Parsing tries
//! an ordered battery of formats, day-first before month-first, and falls
//! back to extracting a date-shaped token out of surrounding text.
//!
//! Ambiguous all-numeric dates resolve day-first (`02/03/2024` is March 2).
//! This mirrors the exports this tool reconciles; month-first locales will
//! see the documented behavior, not a guess.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

/// Date-only formats, tried in order. Two-digit-year variants come before
/// their four-digit siblings: chrono consumes exactly two digits for `%y`,
/// so `02/03/2024` falls through to `%Y` while `02/03/24` resolves to 2024.
const DATE_FORMATS: &[&str] = &[
    "%d/%m/%y",
    "%d/%m/%Y",
    "%d-%m-%y",
    "%d-%m-%Y",
    "%d.%m.%y",
    "%d.%m.%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%d %b %y",
    "%d-%b-%Y",
    "%d-%b-%y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
];

/// Datetime formats; the time-of-day is parsed and then discarded.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
];

/// Numeric date token embedded in text, e.g. "due 02/03/2024 (est)".
static NUMERIC_DATE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{1,4}[./-]\d{1,2}[./-]\d{1,4}\b").expect("invalid numeric date regex")
});

/// Month-name date token embedded in text, e.g. "closed on 2 Mar 2024".
static NAMED_DATE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:\d{1,2}\s+[A-Za-z]{3,9}\.?,?\s+\d{2,4}|[A-Za-z]{3,9}\.?\s+\d{1,2},?\s+\d{2,4})\b")
        .expect("invalid named date regex")
});

/// Parses a calendar date out of `value`, tolerating datetime suffixes and
/// surrounding non-date text. Returns `None` when nothing date-shaped is
/// found.
pub fn parse_flexible_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(date) = parse_exact(trimmed) {
        return Some(date);
    }
    // Whole-string parsing failed; look for an embedded date token.
    for token_re in [&NUMERIC_DATE_TOKEN, &NAMED_DATE_TOKEN] {
        if let Some(found) = token_re.find(trimmed)
            && let Some(date) = parse_exact(found.as_str())
        {
            return Some(date);
        }
    }
    None
}

fn parse_exact(value: &str) -> Option<NaiveDate> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.date());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn iso_date() {
        assert_eq!(parse_flexible_date("2024-03-02"), Some(date(2024, 3, 2)));
    }

    #[test]
    fn ambiguous_numeric_date_is_day_first() {
        assert_eq!(parse_flexible_date("02/03/2024"), Some(date(2024, 3, 2)));
        assert_eq!(parse_flexible_date("02-03-2024"), Some(date(2024, 3, 2)));
    }

    #[test]
    fn month_first_fallback_when_day_first_invalid() {
        // Day-first would need month 13; fall through to month-first.
        assert_eq!(parse_flexible_date("02/13/2024"), Some(date(2024, 2, 13)));
    }

    #[test]
    fn two_digit_year() {
        assert_eq!(parse_flexible_date("02/03/24"), Some(date(2024, 3, 2)));
    }

    #[test]
    fn month_name_forms() {
        assert_eq!(parse_flexible_date("2 Mar 2024"), Some(date(2024, 3, 2)));
        assert_eq!(parse_flexible_date("March 2, 2024"), Some(date(2024, 3, 2)));
        assert_eq!(parse_flexible_date("02-Mar-2024"), Some(date(2024, 3, 2)));
    }

    #[test]
    fn datetime_suffix_is_discarded() {
        assert_eq!(
            parse_flexible_date("2024-03-02 15:30:00"),
            Some(date(2024, 3, 2))
        );
        assert_eq!(
            parse_flexible_date("2024-03-02T15:30:00"),
            Some(date(2024, 3, 2))
        );
    }

    #[test]
    fn embedded_token_in_surrounding_text() {
        assert_eq!(
            parse_flexible_date("renewal due 02/03/2024 (estimated)"),
            Some(date(2024, 3, 2))
        );
        assert_eq!(
            parse_flexible_date("closed on 2 Mar 2024 by rep"),
            Some(date(2024, 3, 2))
        );
    }

    #[test]
    fn non_dates_return_none() {
        assert_eq!(parse_flexible_date(""), None);
        assert_eq!(parse_flexible_date("not a date"), None);
        assert_eq!(parse_flexible_date("1234"), None);
        assert_eq!(parse_flexible_date("1234.5"), None);
    }
}
