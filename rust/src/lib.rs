//! time-id: compact, sortable `YYYYMMDDHHMM` identifiers.
//!
//! A Time ID names the minute of a local wall-clock time. It is taken from
//! the clock or from date text in one of several common layouts.
//!
//! # Format
//!
//! ```text
//! TIME_ID ::= YEAR(4) MONTH(2) DAY(2) HOUR(2) MINUTE(2)
//! ```
//!
//! # Example
//!
//! ```
//! use time_id::{generate_time_id, parse_time_id, DateInput};
//!
//! let id = generate_time_id("05/03/2024 10:20").expect("recognized layout");
//! assert_eq!(id, "202403051020");
//!
//! let now = generate_time_id(DateInput::Now).expect("clock is always readable");
//! assert!(parse_time_id(&now).is_ok());
//! ```

mod generate;
mod resolve;
mod time_id;

pub use generate::{TimeIdReport, generate_time_id};
pub use resolve::{
    DateInput, DatePattern, FALLBACK_PATTERNS, PATTERN_GIVEN, PATTERN_ISO, PATTERN_NOW,
    Resolution, resolve, resolve_text, resolve_with_pattern,
};
pub use time_id::{TIME_ID_LEN, TimeIdError, format_time_id, parse_time_id, validate_time_id};
