//! Time ID formatting and decoding.
//!
//! Format: `YYYYMMDDHHMM` (12 ASCII digits, local wall-clock time, seconds dropped).

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Number of characters in every Time ID.
pub const TIME_ID_LEN: usize = 12;

/// Errors that can occur during Time ID operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeIdError {
    #[error("Could not parse date: {0}")]
    InvalidDate(String),
    #[error("Invalid time ID format: {0}")]
    InvalidFormat(String),
    #[error("Invalid timestamp in time ID: {0}")]
    InvalidTimestamp(String),
}

static TIME_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})(\d{2})(\d{2})(\d{2})(\d{2})$").unwrap());

/// Render a point in time as its Time ID.
///
/// Seconds and sub-second precision never reach the output, so every
/// instant within the same minute yields the same identifier.
pub fn format_time_id(at: &NaiveDateTime) -> String {
    at.format("%Y%m%d%H%M").to_string()
}

fn parse_timestamp(caps: &regex::Captures<'_>) -> Option<NaiveDateTime> {
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    let hour: u32 = caps[4].parse().ok()?;
    let minute: u32 = caps[5].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
}

/// Decode a Time ID back into the minute it names.
pub fn parse_time_id(id: &str) -> Result<NaiveDateTime, TimeIdError> {
    let caps = TIME_ID_PATTERN
        .captures(id)
        .ok_or_else(|| TimeIdError::InvalidFormat(id.to_string()))?;

    parse_timestamp(&caps).ok_or_else(|| TimeIdError::InvalidTimestamp(id.to_string()))
}

/// Validate a Time ID string.
pub fn validate_time_id(id: &str) -> bool {
    parse_time_id(id).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_format_is_twelve_digits() {
        let samples = [
            at(2024, 3, 5, 0, 0, 0),
            at(2023, 12, 31, 23, 59, 59),
            at(1, 1, 1, 0, 0, 0),
            at(9999, 12, 31, 23, 59, 0),
            at(1970, 6, 15, 7, 8, 9),
        ];
        for p in samples {
            let id = format_time_id(&p);
            assert_eq!(id.len(), TIME_ID_LEN, "{id}");
            assert!(id.bytes().all(|b| b.is_ascii_digit()), "{id}");
        }
        assert_eq!(format_time_id(&at(1, 1, 1, 0, 0, 0)), "000101010000");
    }

    #[test]
    fn test_format_drops_seconds() {
        let a = at(2023, 12, 31, 23, 59, 0);
        let b = at(2023, 12, 31, 23, 59, 59);
        let c = b.with_nanosecond(999_000_000).unwrap();
        assert_eq!(format_time_id(&a), "202312312359");
        assert_eq!(format_time_id(&a), format_time_id(&b));
        assert_eq!(format_time_id(&b), format_time_id(&c));
    }

    #[test]
    fn test_parse_valid_ids() {
        assert_eq!(
            parse_time_id("202403050000").unwrap(),
            at(2024, 3, 5, 0, 0, 0)
        );
        assert_eq!(
            parse_time_id("202312312359").unwrap(),
            at(2023, 12, 31, 23, 59, 0)
        );
        assert!(validate_time_id("202402291200"));
    }

    #[test]
    fn test_parse_invalid_cases() {
        assert!(matches!(
            parse_time_id("garbage"),
            Err(TimeIdError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_time_id("2024030500000"),
            Err(TimeIdError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_time_id("2024-03-05 0"),
            Err(TimeIdError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_time_id("202413050000"),
            Err(TimeIdError::InvalidTimestamp(_))
        ));
        assert!(matches!(
            parse_time_id("202302291200"),
            Err(TimeIdError::InvalidTimestamp(_))
        ));
        assert!(matches!(
            parse_time_id("202403052460"),
            Err(TimeIdError::InvalidTimestamp(_))
        ));
        assert!(!validate_time_id(""));
    }

    #[test]
    fn test_format_parse_agree_on_minute() {
        let p = at(2026, 2, 12, 9, 15, 30);
        let back = parse_time_id(&format_time_id(&p)).unwrap();
        assert_eq!(back, at(2026, 2, 12, 9, 15, 0));
    }

    #[test]
    fn test_error_messages_carry_input() {
        let e = TimeIdError::InvalidDate("not-a-date".to_string());
        assert_eq!(e.to_string(), "Could not parse date: not-a-date");
    }
}
