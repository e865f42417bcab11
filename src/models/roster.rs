//! Roster availability model.
//!
//! A territory's roster repeats on the fixed week cycle, not on calendar
//! months: coverage is recorded per `(week key, day key)` pair. Absence of
//! an entry means no cleaner works that day of the cycle, so no bookings
//! can be offered for it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cleaner availability for one territory, keyed by week-in-cycle then day.
///
/// Keys follow the `"week1".."week4"` / `"Mon".."Sun"` convention produced
/// by the cycle calendar, but lookups tolerate casing variants because
/// upstream records are hand-entered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterWindow {
    /// week key → day key → rostered cleaner ids.
    pub days: HashMap<String, HashMap<String, Vec<String>>>,
}

impl RosterWindow {
    /// Creates an empty roster (no coverage anywhere).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds cleaners for a `(week, day)` slot.
    pub fn with_day(
        mut self,
        week_key: impl Into<String>,
        day_key: impl Into<String>,
        cleaners: Vec<String>,
    ) -> Self {
        self.days
            .entry(week_key.into())
            .or_default()
            .insert(day_key.into(), cleaners);
        self
    }

    /// Cleaners rostered for a `(week, day)` slot.
    ///
    /// Tries the keys as given, then lowercase, then capitalized day
    /// variants. Returns an empty slice when the slot has no coverage.
    pub fn cleaners_for(&self, week_key: &str, day_key: &str) -> &[String] {
        let week_entry = self
            .days
            .get(week_key)
            .or_else(|| self.days.get(&week_key.to_lowercase()))
            .or_else(|| self.days.get(&week_key.to_uppercase()));

        let Some(week_entry) = week_entry else {
            return &[];
        };

        for key in day_key_variants(day_key) {
            if let Some(cleaners) = week_entry.get(&key) {
                return cleaners;
            }
        }
        &[]
    }

    /// Whether any cleaner covers the `(week, day)` slot.
    pub fn has_coverage(&self, week_key: &str, day_key: &str) -> bool {
        !self.cleaners_for(week_key, day_key).is_empty()
    }

    /// Whether the roster has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

fn day_key_variants(day_key: &str) -> Vec<String> {
    let lower = day_key.to_lowercase();
    let mut capitalized = lower.clone();
    if let Some(first) = capitalized.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    vec![
        day_key.to_string(),
        lower,
        day_key.to_uppercase(),
        capitalized,
    ]
}
