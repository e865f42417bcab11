//! Cadence resolution.
//!
//! Booking records arrive with their repeat interval expressed in whatever
//! shape the upstream form captured: an explicit day count under one of
//! several aliased fields, a week count, a free-text label ("every 2 weeks",
//! "monthly"), or nothing at all. Resolution runs an ordered chain of typed
//! extractors and takes the first hit; total ambiguity falls back to the
//! 28-day default. The resolver never errors.
//!
//! # "Month" means 28 days
//! Free-text `month` units convert at exactly 28 days, not calendar-month
//! length. Roster availability and capacity checks both repeat on a fixed
//! 4-week cycle, so every unit in the system must reduce to whole days on
//! that cycle. Pinned by `test_month_is_exactly_28_days`.

use chrono::NaiveDate;

use crate::models::CadenceFields;

/// Fallback cadence when no input field resolves.
pub const DEFAULT_CADENCE_DAYS: u32 = 28;

/// Resolves a job's repeat interval in days.
///
/// Resolution order, first match wins:
/// 1. numeric day aliases (`interval_days`, `frequency_days`, `recurring_days`);
/// 2. week aliases (`frequency_weeks`, `recurring_weeks`) × 7;
/// 3. free-text labels, `<number> <day|week|month>` or keyword;
/// 4. whole-day gap from `anchor` to the first override, when positive;
/// 5. [`DEFAULT_CADENCE_DAYS`].
///
/// Always returns a value `>= 1`.
pub fn resolve(fields: &CadenceFields, anchor: Option<NaiveDate>, overrides: &[NaiveDate]) -> u32 {
    const EXTRACTORS: &[fn(&CadenceFields) -> Option<u32>] =
        &[from_day_fields, from_week_fields, from_labels];

    for extract in EXTRACTORS {
        if let Some(days) = extract(fields) {
            return days;
        }
    }

    if let Some(days) = from_history(anchor, overrides) {
        return days;
    }

    DEFAULT_CADENCE_DAYS
}

/// Human label for a job's cadence.
///
/// An explicit non-blank label field wins; otherwise the label is derived
/// from the resolved day count ("Every 2 weeks", "Every month", "Every N
/// days").
pub fn label(fields: &CadenceFields, anchor: Option<NaiveDate>, overrides: &[NaiveDate]) -> String {
    for candidate in [
        &fields.label,
        &fields.frequency_text,
        &fields.service_frequency,
    ] {
        if let Some(text) = candidate {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }

    display_for_days(resolve(fields, anchor, overrides))
}

/// Derived display phrase for a day count.
pub fn display_for_days(days: u32) -> String {
    if days == 0 {
        return String::new();
    }
    if days % 7 == 0 {
        let weeks = days / 7;
        return match weeks {
            1 => "Every week".to_string(),
            _ => format!("Every {weeks} weeks"),
        };
    }
    if days == 30 || days == 31 {
        return "Every month".to_string();
    }
    format!("Every {days} days")
}

fn to_positive_days(value: f64) -> Option<u32> {
    if value.is_finite() && value > 0.0 {
        Some(value.round().max(1.0) as u32)
    } else {
        None
    }
}

fn from_day_fields(fields: &CadenceFields) -> Option<u32> {
    [
        fields.interval_days,
        fields.frequency_days,
        fields.recurring_days,
    ]
    .into_iter()
    .flatten()
    .find_map(to_positive_days)
}

fn from_week_fields(fields: &CadenceFields) -> Option<u32> {
    [fields.frequency_weeks, fields.recurring_weeks]
        .into_iter()
        .flatten()
        .find_map(|weeks| to_positive_days(weeks * 7.0))
}

fn from_labels(fields: &CadenceFields) -> Option<u32> {
    [
        fields.label.as_deref(),
        fields.frequency_text.as_deref(),
        fields.service_frequency.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find_map(parse_label)
}

/// Parses a free-text frequency label.
///
/// Accepts `<number> <day|week|month>` (any surrounding text, plural or
/// singular unit) and the keyword shorthands fortnight / bi-week / biweek,
/// weekly, monthly.
fn parse_label(raw: &str) -> Option<u32> {
    let lower = raw.to_lowercase();

    if let Some((value, unit)) = match_number_unit(&lower) {
        let days = match unit {
            Unit::Day => value,
            Unit::Week => value * 7.0,
            Unit::Month => value * 28.0,
        };
        if let Some(days) = to_positive_days(days) {
            return Some(days);
        }
    }

    if lower.contains("fortnight") || lower.contains("bi-week") || lower.contains("biweek") {
        return Some(14);
    }
    if lower.contains("weekly") {
        return Some(7);
    }
    if lower.contains("monthly") {
        return Some(28);
    }
    None
}

enum Unit {
    Day,
    Week,
    Month,
}

/// Finds the first `<number> <unit>` pair in lowercased text, where unit is
/// a word starting with day / week / month.
fn match_number_unit(text: &str) -> Option<(f64, Unit)> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                i += 1;
            }
            let number: f64 = match text[start..i].parse() {
                Ok(n) => n,
                Err(_) => continue,
            };
            let rest = text[i..].trim_start();
            let unit = if rest.starts_with("day") {
                Some(Unit::Day)
            } else if rest.starts_with("week") {
                Some(Unit::Week)
            } else if rest.starts_with("month") {
                Some(Unit::Month)
            } else {
                None
            };
            if let Some(unit) = unit {
                return Some((number, unit));
            }
        } else {
            i += 1;
        }
    }
    None
}

fn from_history(anchor: Option<NaiveDate>, overrides: &[NaiveDate]) -> Option<u32> {
    let anchor = anchor?;
    let first = overrides.first()?;
    let diff = (*first - anchor).num_days();
    if diff > 0 {
        Some(diff as u32)
    } else {
        None
    }
}
