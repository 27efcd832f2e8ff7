//! Wall-clock access for the stores that stamp new records.
//!
//! Comment and chat ids are millisecond timestamps and comment dates are
//! en-US locale dates. Both come through the `Clock` trait so the reducer
//! stays deterministic under test.

use chrono::{Local, NaiveDate};

pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;

    /// Today's date as `M/D/YYYY`.
    fn locale_date(&self) -> String;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Local::now().timestamp_millis()
    }

    fn locale_date(&self) -> String {
        format_locale_date(Local::now().date_naive())
    }
}

pub fn format_locale_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Parses a comment date in either the seed format (`2023-06-15`) or the
/// locale format user comments are stamped with (`6/15/2023`).
pub fn parse_comment_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed_and_locale_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 6, 15);
        assert_eq!(parse_comment_date("2023-06-15"), expected);
        assert_eq!(parse_comment_date("6/15/2023"), expected);
        assert_eq!(parse_comment_date("06/15/2023"), expected);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_comment_date(""), None);
        assert_eq!(parse_comment_date("yesterday"), None);
        assert_eq!(parse_comment_date("2023-13-01"), None);
    }

    #[test]
    fn test_format_locale_date_is_unpadded() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_locale_date(date), "3/7/2024");
        assert_eq!(parse_comment_date(&format_locale_date(date)), Some(date));
    }
}
