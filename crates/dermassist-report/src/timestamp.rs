//! Scan timestamp interpretation.
//!
//! Stored `created_at` values come in whatever shape the store wrote them.
//! Interpretation is two steps: parse as ISO-8601, and if that fails, degrade
//! to the first ten characters of the raw text as the date with no time.

use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Shown for a date or time that cannot be determined.
pub const NOT_AVAILABLE: &str = "N/A";

const DATE_FORMAT: &str = "%d %B %Y";
const TIME_FORMAT: &str = "%I:%M %p";
const FALLBACK_DATE_CHARS: usize = 10;

/// Date and time of a scan as printed on the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScanMoment {
    pub date: String,
    /// `None` when the time of day could not be recovered.
    pub time: Option<String>,
}

impl ScanMoment {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.and_then(parse_timestamp) {
            Some(dt) => Self::from_datetime(dt),
            None => Self::fallback(raw),
        }
    }

    pub fn from_datetime(dt: DateTime) -> Self {
        Self {
            date: dt.strftime(DATE_FORMAT).to_string(),
            time: Some(dt.strftime(TIME_FORMAT).to_string()),
        }
    }

    /// Degraded form for text that is not a timestamp: the leading ten
    /// characters stand in for the date.
    pub fn fallback(raw: Option<&str>) -> Self {
        let date = match raw {
            Some(s) if !s.is_empty() => s.chars().take(FALLBACK_DATE_CHARS).collect(),
            _ => NOT_AVAILABLE.to_string(),
        };
        Self { date, time: None }
    }

    pub fn is_time_available(&self) -> bool {
        self.time.is_some()
    }

    pub fn time_label(&self) -> &str {
        self.time.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// Parse an ISO-8601 timestamp into local wall-clock time.
///
/// A trailing `Z` is dropped and the written wall-clock time kept; a
/// date-only value is taken as midnight. Offset timestamps that the civil
/// parser rejects are read as instants and shown in UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let local = trimmed
        .strip_suffix('Z')
        .or_else(|| trimmed.strip_suffix('z'))
        .unwrap_or(trimmed);

    if let Ok(dt) = local.parse::<DateTime>() {
        return Some(dt);
    }
    if let Ok(date) = local.parse::<jiff::civil::Date>() {
        return Some(date.to_datetime(jiff::civil::Time::midnight()));
    }
    trimmed
        .parse::<jiff::Timestamp>()
        .ok()
        .map(|ts| ts.to_zoned(TimeZone::UTC).datetime())
}

/// Format a generation stamp, e.g. `05 March 2025, 02:30 PM`.
pub fn format_generated_at(dt: DateTime) -> String {
    dt.strftime("%d %B %Y, %I:%M %p").to_string()
}
