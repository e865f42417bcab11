//! Date normalization boundary.
//!
//! Upstream systems hand the engine dates in several shapes: ISO calendar
//! strings, full RFC 3339 timestamps, epoch milliseconds, or already-parsed
//! dates. Every entry point converts through [`normalize_date`] into a single
//! canonical [`NaiveDate`] before any arithmetic, so the core never has to
//! reason about time-of-day or representation.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::error::ScheduleError;

/// A date in one of the accepted input representations.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    /// `"YYYY-MM-DD"` or a full RFC 3339 timestamp.
    Iso(String),
    /// Milliseconds since the Unix epoch (UTC).
    EpochMs(i64),
    /// An already-parsed calendar date.
    Date(NaiveDate),
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        DateInput::Iso(s.to_string())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self {
        DateInput::Iso(s)
    }
}

impl From<i64> for DateInput {
    fn from(ms: i64) -> Self {
        DateInput::EpochMs(ms)
    }
}

/// Converts any accepted representation into a canonical calendar date.
///
/// Timestamps are truncated to their calendar day (midnight normalization).
///
/// # Errors
/// [`ScheduleError::InvalidDate`] when the input cannot be parsed.
pub fn normalize_date(input: impl Into<DateInput>) -> Result<NaiveDate, ScheduleError> {
    match input.into() {
        DateInput::Date(date) => Ok(date),
        DateInput::EpochMs(ms) => DateTime::<Utc>::from_timestamp_millis(ms)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| ScheduleError::InvalidDate(format!("epoch ms {ms}"))),
        DateInput::Iso(s) => parse_iso(&s),
    }
}

fn parse_iso(s: &str) -> Result<NaiveDate, ScheduleError> {
    let trimmed = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.date());
    }
    Err(ScheduleError::InvalidDate(trimmed.to_string()))
}

/// Formats a date as its `"YYYY-MM-DD"` day key.
///
/// Day keys index `Job::route_order` and the day buckets produced by
/// `occurrence::day_schedule`.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Adds a signed number of whole days.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Whole-day difference `to - from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
