//! Permissive calendar date parsing.
//!
//! Backup logs come from many tools and locales, so a value counts as a date
//! when any of the common representations below matches. Day-first numeric
//! forms are tried before month-first ones.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d-%b-%Y %H:%M:%S", // 15-Jan-2024 10:30:00
    "%d-%b-%Y %H:%M",
    "%d/%m/%Y %H:%M:%S", // European
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S", // US
    "%m/%d/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%Y%m%d%H%M%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%d-%b-%Y",  // 15-Jan-2024
    "%d-%B-%Y",  // 15-January-2024
    "%d/%m/%Y",  // European: 15/01/2024
    "%m/%d/%Y",  // US: 01/15/2024
    "%d.%m.%Y",  // German: 15.01.2024
    "%Y%m%d",    // Compact: 20240115
    "%b %d, %Y", // Jan 15, 2024
    "%B %d, %Y", // January 15, 2024
    "%b %d %Y",
    "%d %b %Y",  // 15 Jan 2024
    "%d %B %Y",  // 15 January 2024
    "%Y-%b-%d",  // 2024-Jan-15
    "%d-%m-%Y",  // 15-01-2024
    "%m-%d-%Y",
];

/// ISO timestamps with a numeric offset, `+0200` or `+02:00`.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%z",
];

/// Time of day accepted after any date form.
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Partial dates resolve to the first day of the period.
const MONTH_FORMATS: &[&str] = &["%Y-%m", "%Y/%m", "%m/%Y", "%b %Y", "%B %Y"];

/// Parse a value as a calendar date in any supported representation.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.date_naive());
    }
    if let Some(dt) = try_parse_datetime(value) {
        return Some(dt.date());
    }
    if let Some(date) = try_parse_date(value) {
        return Some(date);
    }
    if let Some(date) = try_parse_date_with_time(value) {
        return Some(date);
    }
    try_parse_partial(value)
}

/// Returns true if the value parses as a calendar date.
pub fn is_calendar_date(value: &str) -> bool {
    parse_calendar_date(value).is_some()
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            OFFSET_FORMATS.iter().find_map(|fmt| {
                DateTime::parse_from_str(value, fmt)
                    .ok()
                    .map(|dt| dt.naive_local())
            })
        })
}

/// A date form followed by a time of day, split at the last space or `T`.
fn try_parse_date_with_time(value: &str) -> Option<NaiveDate> {
    let (date, time) = value.rsplit_once([' ', 'T'])?;
    let time_ok = TIME_FORMATS
        .iter()
        .any(|fmt| NaiveTime::parse_from_str(time, fmt).is_ok());
    if !time_ok {
        return None;
    }
    try_parse_date(date.trim_end())
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

fn try_parse_partial(value: &str) -> Option<NaiveDate> {
    // YYYY
    if value.len() == 4
        && let Ok(year) = value.parse::<i32>()
    {
        if (1900..=2100).contains(&year) {
            return NaiveDate::from_ymd_opt(year, 1, 1);
        }
        return None;
    }

    MONTH_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(&format!("{value} 01"), &format!("{fmt} %d")).ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn iso_forms() {
        assert_eq!(parse_calendar_date("2025-07-30"), ymd(2025, 7, 30));
        assert_eq!(parse_calendar_date("2025-07-30T22:15:00"), ymd(2025, 7, 30));
        assert_eq!(parse_calendar_date("2025-07-30 22:15"), ymd(2025, 7, 30));
        assert_eq!(
            parse_calendar_date("2025-07-30T22:15:00+02:00"),
            ymd(2025, 7, 30)
        );
        assert_eq!(parse_calendar_date("2025-07-30T22:15:00Z"), ymd(2025, 7, 30));
    }

    #[test]
    fn regional_forms() {
        assert_eq!(parse_calendar_date("30.07.2025"), ymd(2025, 7, 30));
        assert_eq!(parse_calendar_date("30/07/2025"), ymd(2025, 7, 30));
        assert_eq!(parse_calendar_date("07/30/2025"), ymd(2025, 7, 30));
        assert_eq!(parse_calendar_date("30-Jul-2025"), ymd(2025, 7, 30));
        assert_eq!(parse_calendar_date("Jul 30, 2025"), ymd(2025, 7, 30));
        assert_eq!(parse_calendar_date("30 July 2025"), ymd(2025, 7, 30));
        assert_eq!(parse_calendar_date("20250730"), ymd(2025, 7, 30));
        assert_eq!(
            parse_calendar_date("Wed, 30 Jul 2025 22:15:00 +0000"),
            ymd(2025, 7, 30)
        );
    }

    #[test]
    fn any_date_form_with_a_time() {
        for value in [
            "Jan 15, 2024 10:30",
            "January 15, 2024 10:30:00",
            "15 January 2024 10:30:00",
            "15 Jan 2024 10:30",
            "15-01-2024 10:30",
            "01-15-2024 10:30:00",
            "20240115 10:30",
            "2024.01.15 10:30",
            "2024.01.15T10:30:00",
            "2024-Jan-15 10:30",
            "15-January-2024 10:30",
            "15-Jan-2024 10:30",
            "2024-01-15 10:30:00.123",
        ] {
            assert_eq!(parse_calendar_date(value), ymd(2024, 1, 15), "{value}");
        }
    }

    #[test]
    fn numeric_offsets() {
        for value in [
            "2024-01-15T10:30:00+0200",
            "2024-01-15T10:30:00.5-0500",
            "2024-01-15T10:30+02:00",
            "2024-01-15 10:30:00+0000",
        ] {
            assert_eq!(parse_calendar_date(value), ymd(2024, 1, 15), "{value}");
        }
    }

    #[test]
    fn bad_time_suffix_is_not_a_date() {
        assert!(!is_calendar_date("2024-01-15 25:99"));
        assert!(!is_calendar_date("2024-01-15 later"));
        assert!(!is_calendar_date("noon 10:30"));
    }

    #[test]
    fn partial_forms() {
        assert_eq!(parse_calendar_date("2025-07"), ymd(2025, 7, 1));
        assert_eq!(parse_calendar_date("July 2025"), ymd(2025, 7, 1));
        assert_eq!(parse_calendar_date("2025"), ymd(2025, 1, 1));
        assert_eq!(parse_calendar_date("1234"), None);
    }

    #[test]
    fn rejects_garbage() {
        assert!(!is_calendar_date("not-a-date"));
        assert!(!is_calendar_date(""));
        assert!(!is_calendar_date("2025-13-01"));
        assert!(!is_calendar_date("31/31/2025"));
        assert!(!is_calendar_date("yesterday"));
    }
}
