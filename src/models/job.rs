//! Job model.
//!
//! A job is a customer booked onto a repeating visit cadence. The anchor
//! date marks the most recent canonical visit; the occurrence series is
//! projected forward from it and is never stored. Raw cadence inputs are
//! kept alongside the resolved value because upstream records are
//! heterogeneous — some carry a day count, some a week count, some only a
//! free-text frequency label.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A booked recurring service.
///
/// Created when a quote converts to a booking (anchor and cadence fixed at
/// that moment); mutated only by rescheduling. Deletion is an external
/// concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Externally-owned identifier.
    pub id: String,
    /// Customer display name.
    #[serde(default)]
    pub customer_name: String,
    /// Date of the first / most recent canonical occurrence.
    pub anchor_date: Option<NaiveDate>,
    /// Resolved repeat interval in days, cached once known.
    pub cadence_days: Option<u32>,
    /// Raw cadence inputs, resolved lazily when no cached value exists.
    #[serde(default)]
    pub cadence: CadenceFields,
    /// Explicitly recorded future visit dates, merged into the generated
    /// series (never replacing it).
    #[serde(default)]
    pub explicit_overrides: Vec<NaiveDate>,
    /// Day key (`"YYYY-MM-DD"`) → position within that day's route.
    /// Absent entries sort last.
    #[serde(default)]
    pub route_order: HashMap<String, u32>,
    /// Cleaner / roster entry this job is assigned to, if any.
    pub assigned_roster_id: Option<String>,
    /// Monetary value per occurrence, used by capacity accounting.
    #[serde(default)]
    pub value: f64,
}

/// Heterogeneous cadence source fields, checked in fixed priority order
/// by the resolver: numeric day aliases, then week aliases, then free-text
/// labels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CadenceFields {
    /// Explicit interval in days (highest-priority alias).
    pub interval_days: Option<f64>,
    /// Alternate day-count alias.
    pub frequency_days: Option<f64>,
    /// Legacy day-count alias.
    pub recurring_days: Option<f64>,
    /// Interval in weeks.
    pub frequency_weeks: Option<f64>,
    /// Legacy week-count alias.
    pub recurring_weeks: Option<f64>,
    /// Preferred human-entered label (e.g. "Every 4 weeks").
    pub label: Option<String>,
    /// Alternate free-text frequency field.
    pub frequency_text: Option<String>,
    /// Legacy free-text frequency field.
    pub service_frequency: Option<String>,
}

impl Job {
    /// Creates a new job with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            customer_name: String::new(),
            anchor_date: None,
            cadence_days: None,
            cadence: CadenceFields::default(),
            explicit_overrides: Vec::new(),
            route_order: HashMap::new(),
            assigned_roster_id: None,
            value: 0.0,
        }
    }

    /// Sets the customer display name.
    pub fn with_customer_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = name.into();
        self
    }

    /// Sets the anchor date.
    pub fn with_anchor(mut self, anchor: NaiveDate) -> Self {
        self.anchor_date = Some(anchor);
        self
    }

    /// Sets the resolved cadence directly.
    pub fn with_cadence_days(mut self, days: u32) -> Self {
        self.cadence_days = Some(days);
        self
    }

    /// Sets the raw cadence source fields.
    pub fn with_cadence_fields(mut self, fields: CadenceFields) -> Self {
        self.cadence = fields;
        self
    }

    /// Adds an explicit override date.
    pub fn with_override(mut self, date: NaiveDate) -> Self {
        self.explicit_overrides.push(date);
        self
    }

    /// Sets the route position for a day key.
    pub fn with_route_position(mut self, date_key: impl Into<String>, index: u32) -> Self {
        self.route_order.insert(date_key.into(), index);
        self
    }

    /// Sets the assigned roster entry.
    pub fn with_roster(mut self, roster_id: impl Into<String>) -> Self {
        self.assigned_roster_id = Some(roster_id.into());
        self
    }

    /// Sets the per-occurrence value.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Resolved cadence: the cached value when present, otherwise resolved
    /// from the raw fields (always `>= 1`).
    pub fn effective_cadence_days(&self) -> u32 {
        match self.cadence_days {
            Some(days) if days >= 1 => days,
            _ => crate::cadence::resolve(
                &self.cadence,
                self.anchor_date,
                &self.explicit_overrides,
            ),
        }
    }

    /// Route position for a day key, if one was recorded.
    pub fn route_position(&self, date_key: &str) -> Option<u32> {
        self.route_order.get(date_key).copied()
    }
}

impl CadenceFields {
    /// Fields with only a free-text label set.
    pub fn from_label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// Fields with only an explicit day count set.
    pub fn from_days(days: f64) -> Self {
        Self {
            interval_days: Some(days),
            ..Self::default()
        }
    }

    /// Fields with only a week count set.
    pub fn from_weeks(weeks: f64) -> Self {
        Self {
            frequency_weeks: Some(weeks),
            ..Self::default()
        }
    }
}

/// One concrete visit date for a job, projected on demand from its anchor,
/// cadence, and overrides. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Owning job.
    pub job_id: String,
    /// Calendar date of the visit.
    pub date: NaiveDate,
    /// Position within the day's route, if one was recorded.
    pub route_index: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_job_builder() {
        let job = Job::new("J1")
            .with_customer_name("Mrs Hill")
            .with_anchor(d("2025-11-03"))
            .with_cadence_days(28)
            .with_override(d("2025-12-01"))
            .with_route_position("2025-11-03", 2)
            .with_roster("cleaner-a")
            .with_value(45.0);

        assert_eq!(job.id, "J1");
        assert_eq!(job.customer_name, "Mrs Hill");
        assert_eq!(job.anchor_date, Some(d("2025-11-03")));
        assert_eq!(job.effective_cadence_days(), 28);
        assert_eq!(job.explicit_overrides, vec![d("2025-12-01")]);
        assert_eq!(job.route_position("2025-11-03"), Some(2));
        assert_eq!(job.route_position("2025-11-04"), None);
        assert_eq!(job.assigned_roster_id.as_deref(), Some("cleaner-a"));
        assert!((job.value - 45.0).abs() < 1e-10);
    }

    #[test]
    fn test_effective_cadence_falls_back_to_raw_fields() {
        let job = Job::new("J1").with_cadence_fields(CadenceFields::from_weeks(2.0));
        assert_eq!(job.effective_cadence_days(), 14);
    }

    #[test]
    fn test_effective_cadence_ignores_cached_zero() {
        let mut job = Job::new("J1");
        job.cadence_days = Some(0);
        assert_eq!(job.effective_cadence_days(), 28);
    }

    #[test]
    fn test_job_serde_defaults() {
        let job: Job = serde_json::from_str(
            r#"{"id":"J1","anchor_date":"2025-11-03","cadence_days":28,"assigned_roster_id":null}"#,
        )
        .unwrap();
        assert_eq!(job.id, "J1");
        assert!(job.explicit_overrides.is_empty());
        assert!(job.route_order.is_empty());
        assert_eq!(job.value, 0.0);
    }
}
