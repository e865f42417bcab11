//! Rescheduling: anchor moves and within-day route reordering.
//!
//! Both operations emit patches rather than writing anywhere; the
//! persistence writer applies them to the job store. Moving an anchor also
//! primes a two-date preview of the next occurrences so "next clean" fields
//! stay readable without a full projection pass.
//!
//! Policy (e.g. disallowing past dates) is a caller concern: the engine
//! validates nothing beyond date parseability. If two reschedules race for
//! one job, the last writer's anchor wins; optimistic locking belongs to
//! the storage layer.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date::{normalize_date, DateInput};
use crate::error::ScheduleError;
use crate::models::Job;

/// Patch produced by an anchor move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorMove {
    /// Job being rescheduled.
    pub job_id: String,
    /// Replacement anchor date.
    pub new_anchor: NaiveDate,
    /// Preview of the next two occurrences: `anchor + cadence` and
    /// `anchor + 2·cadence`.
    pub next_dates: [NaiveDate; 2],
}

impl AnchorMove {
    /// Applies the patch: anchor replaced, overrides replaced by the
    /// two-date preview.
    pub fn apply(&self, job: &mut Job) {
        job.anchor_date = Some(self.new_anchor);
        job.explicit_overrides = self.next_dates.to_vec();
    }
}

/// Patch produced by a within-day reorder, scoped to one day key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOrderPatch {
    /// Day the ordering applies to, `"YYYY-MM-DD"`.
    pub date_key: String,
    /// Dense 0-based positions for exactly the jobs that were ordered.
    pub positions: HashMap<String, u32>,
}

impl RouteOrderPatch {
    /// Position assigned to a job, if it was part of the reorder.
    pub fn position(&self, job_id: &str) -> Option<u32> {
        self.positions.get(job_id).copied()
    }

    /// Applies the patch to the jobs it names. Other jobs and other day
    /// keys are untouched.
    pub fn apply(&self, jobs: &mut [Job]) {
        for job in jobs {
            if let Some(&index) = self.positions.get(&job.id) {
                job.route_order.insert(self.date_key.clone(), index);
            }
        }
    }
}

/// Moves a job's anchor to a new date.
///
/// The target is normalized to a calendar day; the cadence used for the
/// preview is the job's resolved cadence.
///
/// # Errors
/// [`ScheduleError::InvalidDate`] when the target date cannot be parsed.
pub fn move_anchor(job: &Job, new_anchor: impl Into<DateInput>) -> Result<AnchorMove, ScheduleError> {
    let anchor = normalize_date(new_anchor)?;
    let cadence = i64::from(job.effective_cadence_days());
    Ok(AnchorMove {
        job_id: job.id.clone(),
        new_anchor: anchor,
        next_dates: [
            anchor + Duration::days(cadence),
            anchor + Duration::days(2 * cadence),
        ],
    })
}

/// Builds a route-order patch from a user-chosen sequence for one day.
///
/// Positions are dense integers from 0 in the given order. Jobs absent from
/// the sequence receive no entry and keep sorting last for that day.
///
/// # Errors
/// [`ScheduleError::InvalidDate`] when `date_key` is not a parseable date.
pub fn reorder_within_day(
    date_key: &str,
    ordered_job_ids: &[impl AsRef<str>],
) -> Result<RouteOrderPatch, ScheduleError> {
    normalize_date(date_key)?;
    let positions = ordered_job_ids
        .iter()
        .enumerate()
        .map(|(index, id)| (id.as_ref().to_string(), index as u32))
        .collect();
    Ok(RouteOrderPatch {
        date_key: date_key.to_string(),
        positions,
    })
}

/// Day offsets of a job's recorded future visits relative to its anchor.
///
/// Up to two deduplicated positive offsets, ascending. When the job has no
/// anchor or no usable overrides, falls back to `[cadence, 2·cadence]`.
/// Slot-acceptance writebacks use these to rebuild "next clean" fields from
/// a freshly chosen date.
pub fn recurring_offsets(job: &Job) -> Vec<u32> {
    let cadence = job.effective_cadence_days();
    let fallback = vec![cadence, cadence * 2];

    let Some(anchor) = job.anchor_date else {
        return fallback;
    };

    let mut offsets: Vec<u32> = job
        .explicit_overrides
        .iter()
        .filter_map(|&date| {
            let diff = (date - anchor).num_days();
            (diff > 0).then_some(diff as u32)
        })
        .collect();

    if offsets.is_empty() {
        return fallback;
    }
    offsets.sort_unstable();
    offsets.dedup();
    offsets.truncate(2);
    offsets
}

/// Projects a job's recurring offsets from a new base date.
pub fn next_dates_from(job: &Job, base: NaiveDate) -> Vec<NaiveDate> {
    recurring_offsets(job)
        .into_iter()
        .map(|days| base + Duration::days(i64::from(days)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occurrence::occurrences_in_range;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_move_anchor_previews_next_two() {
        let job = Job::new("J1").with_anchor(d("2025-11-03")).with_cadence_days(28);
        let patch = move_anchor(&job, "2025-11-10").unwrap();
        assert_eq!(patch.job_id, "J1");
        assert_eq!(patch.new_anchor, d("2025-11-10"));
        assert_eq!(patch.next_dates, [d("2025-12-08"), d("2026-01-05")]);
    }

    #[test]
    fn test_move_anchor_uses_resolved_cadence() {
        let job = Job::new("J1")
            .with_cadence_fields(crate::models::CadenceFields::from_label("every 2 weeks"));
        let patch = move_anchor(&job, d("2025-11-10")).unwrap();
        assert_eq!(patch.next_dates, [d("2025-11-24"), d("2025-12-08")]);
    }

    #[test]
    fn test_move_anchor_accepts_timestamps() {
        let job = Job::new("J1").with_cadence_days(28);
        let patch = move_anchor(&job, "2025-11-10T09:30:00Z").unwrap();
        assert_eq!(patch.new_anchor, d("2025-11-10"));
    }

    #[test]
    fn test_move_anchor_allows_past_dates() {
        // Past-date policy belongs to the caller, not the engine.
        let job = Job::new("J1").with_cadence_days(28);
        assert!(move_anchor(&job, "2001-01-01").is_ok());
    }

    #[test]
    fn test_move_anchor_rejects_unparseable() {
        let job = Job::new("J1");
        assert!(matches!(
            move_anchor(&job, "soonish"),
            Err(ScheduleError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_apply_rechains_the_series() {
        let mut job = Job::new("J1").with_anchor(d("2025-11-03")).with_cadence_days(28);
        let patch = move_anchor(&job, "2025-11-10").unwrap();
        patch.apply(&mut job);

        assert_eq!(job.anchor_date, Some(d("2025-11-10")));
        // The projection now walks from the new anchor.
        let dates = occurrences_in_range(&job, d("2025-11-01"), d("2026-01-31"));
        assert_eq!(dates, vec![d("2025-11-10"), d("2025-12-08"), d("2026-01-05")]);
    }

    #[test]
    fn test_reorder_emits_dense_positions() {
        let patch =
            reorder_within_day("2025-11-10", &["jobA", "jobC", "jobB"]).unwrap();
        assert_eq!(patch.date_key, "2025-11-10");
        assert_eq!(patch.position("jobA"), Some(0));
        assert_eq!(patch.position("jobC"), Some(1));
        assert_eq!(patch.position("jobB"), Some(2));
        // A job not listed retains no entry.
        assert_eq!(patch.position("jobD"), None);
    }

    #[test]
    fn test_reorder_rejects_bad_date_key() {
        let ids = ["jobA"];
        assert!(matches!(
            reorder_within_day("10/11/2025", &ids),
            Err(ScheduleError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_recurring_offsets_from_overrides() {
        let job = Job::new("J1")
            .with_anchor(d("2025-11-03"))
            .with_cadence_days(28)
            .with_override(d("2025-11-17"))
            .with_override(d("2025-12-01"))
            .with_override(d("2025-12-15")); // third is dropped
        assert_eq!(recurring_offsets(&job), vec![14, 28]);
    }

    #[test]
    fn test_recurring_offsets_fallback() {
        let job = Job::new("J1").with_cadence_days(28);
        assert_eq!(recurring_offsets(&job), vec![28, 56]);

        // Overrides on or before the anchor are ignored.
        let job = Job::new("J1")
            .with_anchor(d("2025-11-03"))
            .with_cadence_days(14)
            .with_override(d("2025-11-03"));
        assert_eq!(recurring_offsets(&job), vec![14, 28]);
    }

    #[test]
    fn test_next_dates_from_new_base() {
        let job = Job::new("J1").with_anchor(d("2025-11-03")).with_cadence_days(28);
        assert_eq!(
            next_dates_from(&job, d("2025-12-05")),
            vec![d("2026-01-02"), d("2026-01-30")]
        );
    }

    #[test]
    fn test_reorder_apply_scoped_to_day() {
        let mut jobs = vec![
            Job::new("jobA").with_route_position("2025-11-17", 5),
            Job::new("jobB"),
            Job::new("jobD").with_route_position("2025-11-10", 0),
        ];
        let patch = reorder_within_day("2025-11-10", &["jobB", "jobA"]).unwrap();
        patch.apply(&mut jobs);

        assert_eq!(jobs[0].route_position("2025-11-10"), Some(1));
        // Other day keys untouched.
        assert_eq!(jobs[0].route_position("2025-11-17"), Some(5));
        assert_eq!(jobs[1].route_position("2025-11-10"), Some(0));
        // Unlisted job keeps its old entry.
        assert_eq!(jobs[2].route_position("2025-11-10"), Some(0));
    }
}
