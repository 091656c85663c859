//! Application date parsing.
//!
//! Dates arrive as free text. Parsing happens before the date dimension
//! deduplicates, so `2024-01-05` and `2024-1-5` resolve to the same calendar
//! date. Values that match no known format yield `None` and the owning row is
//! later dropped by the fact join.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

// ISO first; slash dates are read month-first.
const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%b-%Y",  // 15-Jan-2024
    "%b %d, %Y", // Jan 15, 2024
    "%B %d, %Y", // January 15, 2024
    "%Y%m%d",    // 20240115
];

/// Parses an application date, discarding any time-of-day component.
pub fn parse_application_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in &DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(d);
        }
    }

    for fmt in &DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn iso_dates_with_and_without_padding() {
        assert_eq!(parse_application_date("2024-01-05"), ymd(2024, 1, 5));
        assert_eq!(parse_application_date("2024-1-5"), ymd(2024, 1, 5));
        assert_eq!(parse_application_date(" 2024-01-05 "), ymd(2024, 1, 5));
    }

    #[test]
    fn alternate_formats() {
        assert_eq!(parse_application_date("2024/03/09"), ymd(2024, 3, 9));
        assert_eq!(parse_application_date("03/09/2024"), ymd(2024, 3, 9));
        assert_eq!(parse_application_date("15-Jan-2024"), ymd(2024, 1, 15));
        assert_eq!(parse_application_date("Jan 15, 2024"), ymd(2024, 1, 15));
        assert_eq!(parse_application_date("20240115"), ymd(2024, 1, 15));
    }

    #[test]
    fn datetimes_keep_the_date() {
        assert_eq!(
            parse_application_date("2022-07-30 14:05:00"),
            ymd(2022, 7, 30)
        );
        assert_eq!(
            parse_application_date("2022-07-30T23:59:59+02:00"),
            ymd(2022, 7, 30)
        );
    }

    #[test]
    fn invalid_dates_are_none() {
        assert_eq!(parse_application_date(""), None);
        assert_eq!(parse_application_date("yesterday"), None);
        assert_eq!(parse_application_date("2023-13-01"), None);
        assert_eq!(parse_application_date("2023-02-30"), None);
    }
}
