//! Resolve-then-format entry points.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::resolve::{DateInput, resolve_with_pattern};
use crate::time_id::{TimeIdError, format_time_id};

/// Outcome of one generation, serializable for `--json` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeIdReport {
    pub time_id: String,
    pub resolved: NaiveDateTime,
    pub pattern: &'static str,
}

impl TimeIdReport {
    /// Resolve `input` and keep every intermediate result.
    pub fn generate<'a>(input: impl Into<DateInput<'a>>) -> Result<Self, TimeIdError> {
        let resolution = resolve_with_pattern(input)?;
        Ok(Self {
            time_id: format_time_id(&resolution.at),
            resolved: resolution.at,
            pattern: resolution.pattern,
        })
    }
}

/// Generate a Time ID for the clock, a resolved value, or date text.
///
/// ```
/// use time_id::generate_time_id;
///
/// assert_eq!(generate_time_id("2023-12-31 23:59").unwrap(), "202312312359");
/// assert!(generate_time_id("garbage").is_err());
/// ```
pub fn generate_time_id<'a>(input: impl Into<DateInput<'a>>) -> Result<String, TimeIdError> {
    TimeIdReport::generate(input).map(|report| report.time_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_id::validate_time_id;
    use chrono::NaiveDate;

    #[test]
    fn test_generate_from_text() {
        assert_eq!(generate_time_id("2024-03-05").unwrap(), "202403050000");
        assert_eq!(
            generate_time_id("2024-03-05 00:00:00").unwrap(),
            "202403050000"
        );
        assert_eq!(generate_time_id("2024/03/05").unwrap(), "202403050000");
        assert_eq!(generate_time_id("05-03-2024").unwrap(), "202403050000");
    }

    #[test]
    fn test_generate_now_shape() {
        let id = generate_time_id(DateInput::Now).unwrap();
        assert!(validate_time_id(&id), "{id}");
    }

    #[test]
    fn test_generate_given_value() {
        let p = NaiveDate::from_ymd_opt(2026, 2, 12)
            .unwrap()
            .and_hms_opt(9, 15, 42)
            .unwrap();
        assert_eq!(generate_time_id(p).unwrap(), "202602120915");
    }

    #[test]
    fn test_report_json() {
        let report = TimeIdReport::generate("31/12/2023 23:59").unwrap();
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["time_id"], "202312312359");
        assert_eq!(v["resolved"], "2023-12-31T23:59:00");
        assert_eq!(v["pattern"], "DD/MM/YYYY HH:MM");
    }

    #[test]
    fn test_generate_error_names_input() {
        let err = generate_time_id("not-a-date").unwrap_err();
        assert!(err.to_string().contains("not-a-date"));
    }
}
