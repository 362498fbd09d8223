//! Date/time resolution from the clock, a ready value, or loosely formatted text.
//!
//! Text goes through a strict ISO-8601 attempt first and then through
//! [`FALLBACK_PATTERNS`] in order. The first pattern that matches the whole
//! string wins, so `YYYY-first` layouts always beat `DD-first` ones.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::time_id::TimeIdError;

/// Pattern name reported when the clock was read.
pub const PATTERN_NOW: &str = "now";
/// Pattern name reported when the caller supplied a resolved value.
pub const PATTERN_GIVEN: &str = "given";
/// Pattern name reported for the strict ISO-8601 attempt.
pub const PATTERN_ISO: &str = "iso-8601";

/// One entry of the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePattern {
    /// Human-readable layout, e.g. `DD/MM/YYYY HH:MM`.
    pub name: &'static str,
    /// `chrono` format string.
    pub format: &'static str,
    /// Whether the layout carries a time of day.
    pub has_time: bool,
}

const fn pattern(name: &'static str, format: &'static str, has_time: bool) -> DatePattern {
    DatePattern {
        name,
        format,
        has_time,
    }
}

/// Explicit layouts tried after the strict ISO attempt, highest priority first.
pub const FALLBACK_PATTERNS: [DatePattern; 12] = [
    pattern("YYYY-MM-DD HH:MM:SS", "%Y-%m-%d %H:%M:%S", true),
    pattern("YYYY-MM-DD HH:MM", "%Y-%m-%d %H:%M", true),
    pattern("YYYY-MM-DD", "%Y-%m-%d", false),
    pattern("YYYY/MM/DD HH:MM:SS", "%Y/%m/%d %H:%M:%S", true),
    pattern("YYYY/MM/DD HH:MM", "%Y/%m/%d %H:%M", true),
    pattern("YYYY/MM/DD", "%Y/%m/%d", false),
    pattern("DD-MM-YYYY HH:MM:SS", "%d-%m-%Y %H:%M:%S", true),
    pattern("DD-MM-YYYY HH:MM", "%d-%m-%Y %H:%M", true),
    pattern("DD-MM-YYYY", "%d-%m-%Y", false),
    pattern("DD/MM/YYYY HH:MM:SS", "%d/%m/%Y %H:%M:%S", true),
    pattern("DD/MM/YYYY HH:MM", "%d/%m/%Y %H:%M", true),
    pattern("DD/MM/YYYY", "%d/%m/%Y", false),
];

/// Input accepted by [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput<'a> {
    /// Read the local clock.
    Now,
    /// Already resolved; passed through unchanged.
    At(NaiveDateTime),
    /// Text to run through the pattern chain.
    Text(&'a str),
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for DateInput<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text.as_str())
    }
}

impl<'a> From<Option<&'a str>> for DateInput<'a> {
    fn from(text: Option<&'a str>) -> Self {
        text.map_or(Self::Now, Self::Text)
    }
}

impl From<NaiveDateTime> for DateInput<'_> {
    fn from(at: NaiveDateTime) -> Self {
        Self::At(at)
    }
}

/// A resolved point in time and the pattern that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub at: NaiveDateTime,
    pub pattern: &'static str,
}

static ISO_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})(?:[T ](\d{2}):(\d{2})(?::(\d{2})(?:\.(\d{1,6}))?)?)?$")
        .unwrap()
});

// Full-string shape of each fallback pattern, same order as FALLBACK_PATTERNS.
// chrono accepts short years for %Y, so the shape pins the year to four digits.
static FALLBACK_SHAPES: Lazy<Vec<Regex>> = Lazy::new(|| {
    FALLBACK_PATTERNS
        .iter()
        .map(|p| build_shape(p.format))
        .collect()
});

fn build_shape(format: &str) -> Regex {
    let mut shape = String::from("^");
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            shape.push_str(r"\s+");
            continue;
        }
        if c != '%' {
            shape.push_str(&regex::escape(&c.to_string()));
            continue;
        }
        match chars.next() {
            Some('Y') => shape.push_str(r"\d{4}"),
            Some(_) => shape.push_str(r"\d{1,2}"),
            None => shape.push('%'),
        }
    }
    shape.push('$');
    Regex::new(&shape).unwrap()
}

fn parse_iso(text: &str) -> Option<NaiveDateTime> {
    let caps = ISO_PATTERN.captures(text)?;

    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    let field = |i: usize| -> Option<u32> {
        caps.get(i).map_or(Some(0), |m| m.as_str().parse().ok())
    };
    let hour = field(4)?;
    let minute = field(5)?;
    let second = field(6)?;
    let micros = match caps.get(7) {
        Some(m) => format!("{:0<6}", m.as_str()).parse().ok()?,
        None => 0,
    };

    date.and_hms_micro_opt(hour, minute, second, micros)
}

fn parse_with(pattern: &DatePattern, text: &str) -> Option<NaiveDateTime> {
    if pattern.has_time {
        // chrono reads a seconds field of 60 as a leap second.
        NaiveDateTime::parse_from_str(text, pattern.format)
            .ok()
            .filter(|at| at.nanosecond() < 1_000_000_000)
    } else {
        NaiveDate::parse_from_str(text, pattern.format)
            .ok()
            .map(|date| date.and_time(NaiveTime::MIN))
    }
}

/// Resolve text through the strict ISO attempt and then the fallback chain.
pub fn resolve_text(text: &str) -> Result<Resolution, TimeIdError> {
    if let Some(at) = parse_iso(text) {
        debug!("resolved {text:?} as {PATTERN_ISO}");
        return Ok(Resolution {
            at,
            pattern: PATTERN_ISO,
        });
    }

    for (pattern, shape) in FALLBACK_PATTERNS.iter().zip(FALLBACK_SHAPES.iter()) {
        if !shape.is_match(text) {
            continue;
        }
        trace!("trying {} for {text:?}", pattern.name);
        if let Some(at) = parse_with(pattern, text) {
            debug!("resolved {text:?} as {}", pattern.name);
            return Ok(Resolution {
                at,
                pattern: pattern.name,
            });
        }
    }

    debug!("no pattern matched {text:?}");
    Err(TimeIdError::InvalidDate(text.to_string()))
}

/// Resolve any input, reporting which pattern produced the value.
pub fn resolve_with_pattern<'a>(
    input: impl Into<DateInput<'a>>,
) -> Result<Resolution, TimeIdError> {
    match input.into() {
        DateInput::Now => {
            let at = Local::now().naive_local();
            debug!("read local clock: {at}");
            Ok(Resolution {
                at,
                pattern: PATTERN_NOW,
            })
        }
        DateInput::At(at) => Ok(Resolution {
            at,
            pattern: PATTERN_GIVEN,
        }),
        DateInput::Text(text) => resolve_text(text),
    }
}

/// Resolve any input to a point in time.
pub fn resolve<'a>(input: impl Into<DateInput<'a>>) -> Result<NaiveDateTime, TimeIdError> {
    resolve_with_pattern(input).map(|r| r.at)
}
