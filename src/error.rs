//! Error types.
//!
//! The engine distinguishes genuinely invalid input (unparseable dates,
//! non-positive cadence values found during validation) from "no data"
//! outcomes. No capacity in the lookahead window, a missing roster, or an
//! empty query range are all represented as empty results, never as errors,
//! so callers can render a friendly "no slots available" message.

use thiserror::Error;

/// Errors produced by the scheduling engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// A date input could not be parsed into a calendar date.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// A cadence value was zero or negative.
    ///
    /// Only surfaced by validation; the resolver and generator default
    /// or clamp rather than propagate (see `cadence` and `occurrence`).
    #[error("invalid cadence: {0} days")]
    InvalidCadence(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = ScheduleError::InvalidDate("not-a-date".into());
        assert_eq!(e.to_string(), "invalid date: not-a-date");

        let e = ScheduleError::InvalidCadence(0);
        assert_eq!(e.to_string(), "invalid cadence: 0 days");
    }
}
