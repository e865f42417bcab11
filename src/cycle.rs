//! Cycle key calculation.
//!
//! Roster availability repeats on a fixed 4-week pattern anchored to a
//! historical Monday, not on calendar months. Any date maps to a
//! `(week-in-cycle, weekday)` key: normalize to the Monday of its ISO week,
//! count whole weeks from the baseline, and wrap modulo the cycle length.
//! The pattern never drifts across leap years or month boundaries, because
//! the arithmetic only ever counts whole days.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Number of weeks in the default repeating cycle.
pub const CYCLE_WEEKS: u32 = 4;

/// The fixed baseline Monday every cycle position is measured from.
/// 2025-11-03 is a Monday; week 1 of the cycle starts there.
pub fn default_baseline() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 3).expect("valid baseline date")
}

/// A date's position in the repeating cycle. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleKey {
    /// Week within the cycle, 1-based.
    pub week_in_cycle: u32,
    /// Weekday of the date.
    pub day: Weekday,
}

impl CycleKey {
    /// Week key string, `"week1".."weekN"`.
    pub fn week_key(&self) -> String {
        format!("week{}", self.week_in_cycle)
    }

    /// Day key string, `"Mon".."Sun"`.
    pub fn day_key(&self) -> &'static str {
        match self.day {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }
}

/// Maps dates to cycle keys relative to a fixed baseline Monday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleCalendar {
    /// Baseline Monday; dates on or after it land in week 1 of cycle 0.
    pub baseline: NaiveDate,
    /// Cycle length in weeks.
    pub weeks: u32,
}

impl Default for CycleCalendar {
    fn default() -> Self {
        Self {
            baseline: default_baseline(),
            weeks: CYCLE_WEEKS,
        }
    }
}

impl CycleCalendar {
    /// Creates a calendar with a custom baseline and cycle length.
    ///
    /// The baseline is normalized to the Monday of its week, so passing any
    /// date within the intended first week is equivalent.
    pub fn new(baseline: NaiveDate, weeks: u32) -> Self {
        Self {
            baseline: monday_of_week(baseline),
            weeks: weeks.max(1),
        }
    }

    /// Cycle key for a date.
    pub fn cycle_key(&self, date: NaiveDate) -> CycleKey {
        let week_start = monday_of_week(date);
        let diff_weeks = (week_start - self.baseline).num_days().div_euclid(7);
        let cycle_index = diff_weeks.rem_euclid(self.weeks as i64) as u32;
        CycleKey {
            week_in_cycle: cycle_index + 1,
            day: date.weekday(),
        }
    }

    /// Week key for a date, `"week1".."weekN"`.
    pub fn week_key(&self, date: NaiveDate) -> String {
        self.cycle_key(date).week_key()
    }

    /// Day key for a date, `"Mon".."Sun"`.
    pub fn day_key(&self, date: NaiveDate) -> &'static str {
        self.cycle_key(date).day_key()
    }
}

/// Monday of the date's ISO week.
fn monday_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_baseline_is_week1() {
        let cal = CycleCalendar::default();
        assert_eq!(cal.week_key(d("2025-11-03")), "week1");
        assert_eq!(cal.day_key(d("2025-11-03")), "Mon");
    }

    #[test]
    fn test_whole_week_shares_key() {
        let cal = CycleCalendar::default();
        // Monday through Sunday of the baseline week are all week1.
        for offset in 0..7 {
            let date = d("2025-11-03") + Duration::days(offset);
            assert_eq!(cal.week_key(date), "week1", "offset {offset}");
        }
        assert_eq!(cal.week_key(d("2025-11-10")), "week2");
    }

    #[test]
    fn test_cycle_wraps_every_4_weeks() {
        let cal = CycleCalendar::default();
        assert_eq!(cal.week_key(d("2025-11-10")), "week2");
        assert_eq!(cal.week_key(d("2025-11-17")), "week3");
        assert_eq!(cal.week_key(d("2025-11-24")), "week4");
        // 28 days after the baseline, back to week1.
        assert_eq!(cal.week_key(d("2025-12-01")), "week1");
    }

    #[test]
    fn test_stable_under_28k_day_shifts() {
        let cal = CycleCalendar::default();
        let date = d("2025-11-14");
        let key = cal.cycle_key(date);
        for k in [-5_i64, -1, 1, 3, 13] {
            let shifted = date + Duration::days(28 * k);
            assert_eq!(cal.cycle_key(shifted), key, "k = {k}");
        }
    }

    #[test]
    fn test_dates_before_baseline() {
        let cal = CycleCalendar::default();
        // One week before the baseline wraps to week4.
        assert_eq!(cal.week_key(d("2025-10-27")), "week4");
        assert_eq!(cal.week_key(d("2025-10-06")), "week1");
    }

    #[test]
    fn test_day_keys() {
        let cal = CycleCalendar::default();
        assert_eq!(cal.day_key(d("2025-11-04")), "Tue");
        assert_eq!(cal.day_key(d("2025-11-08")), "Sat");
        assert_eq!(cal.day_key(d("2025-11-09")), "Sun");
    }

    #[test]
    fn test_custom_baseline_normalized_to_monday() {
        // A Wednesday baseline behaves as its week's Monday.
        let cal = CycleCalendar::new(d("2025-11-05"), 4);
        assert_eq!(cal.baseline, d("2025-11-03"));
        assert_eq!(cal.week_key(d("2025-11-03")), "week1");
    }

    #[test]
    fn test_leap_year_boundary_does_not_drift() {
        let cal = CycleCalendar::default();
        // 2028 is a leap year; 2028-02-28 ± 28k days stays on one key.
        let date = d("2028-02-28");
        let key = cal.cycle_key(date);
        assert_eq!(cal.cycle_key(date + Duration::days(28)), key);
        assert_eq!(cal.cycle_key(date - Duration::days(28)), key);
    }
}
