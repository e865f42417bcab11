//! Occurrence projection.
//!
//! Expands a job's anchor + cadence + explicit overrides into concrete visit
//! dates within a query range. The expansion is deterministic and
//! idempotent: no hidden state, same inputs always yield the same
//! de-duplicated, ascending sequence.
//!
//! # Algorithm
//! 1. No anchor → no cadence walk (overrides may still land in range).
//! 2. Anchor before the range start is fast-forwarded by whole cadence
//!    multiples, then stepped singly, so far-past anchors cost O(1) + a few
//!    steps rather than an unbounded loop.
//! 3. Walk forward one cadence at a time, emitting in-range dates, bounded
//!    by a hard step ceiling against misconfigured cadences.
//! 4. Merge in-range overrides, dedupe by calendar day, sort ascending.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate};
use log::trace;

use crate::date::date_key;
use crate::models::{Job, Occurrence};

/// Hard ceiling on cadence-walk steps per job per query.
pub const MAX_OCCURRENCE_STEPS: u32 = 1000;

/// Visit dates for a job within `[range_start, range_end]` (inclusive).
///
/// Returns an empty list when `range_end < range_start`. The cadence is
/// clamped to at least 1 day; the resolver guarantees positivity, the clamp
/// keeps a corrupt record from looping forever.
pub fn occurrences_in_range(
    job: &Job,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Vec<NaiveDate> {
    if range_end < range_start {
        return Vec::new();
    }

    let mut seen: BTreeSet<NaiveDate> = BTreeSet::new();
    let cadence = i64::from(job.effective_cadence_days().max(1));

    if let Some(anchor) = job.anchor_date {
        let mut current = anchor;

        if current < range_start {
            let gap = (range_start - current).num_days();
            let skips = gap / cadence;
            if skips > 0 {
                current += Duration::days(skips * cadence);
            }
            while current < range_start {
                current += Duration::days(cadence);
            }
        }

        let mut steps = 0;
        while current <= range_end && steps < MAX_OCCURRENCE_STEPS {
            if current >= range_start {
                seen.insert(current);
            }
            current += Duration::days(cadence);
            steps += 1;
        }
        if steps == MAX_OCCURRENCE_STEPS {
            trace!(
                "occurrence walk for job {} hit step ceiling (cadence {cadence})",
                job.id
            );
        }
    }

    for &date in &job.explicit_overrides {
        if date >= range_start && date <= range_end {
            seen.insert(date);
        }
    }

    seen.into_iter().collect()
}

/// Occurrences for a job within a range, with route positions attached.
pub fn project(job: &Job, range_start: NaiveDate, range_end: NaiveDate) -> Vec<Occurrence> {
    occurrences_in_range(job, range_start, range_end)
        .into_iter()
        .map(|date| Occurrence {
            job_id: job.id.clone(),
            date,
            route_index: job.route_position(&date_key(date)),
        })
        .collect()
}

/// Buckets a set of jobs into per-day occurrence lists over a range.
///
/// Within each day, occurrences are ordered by recorded route position;
/// jobs without an entry for that day sort last, ties break on job id.
/// This is the shape a calendar view renders directly.
pub fn day_schedule(
    jobs: &[Job],
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> BTreeMap<NaiveDate, Vec<Occurrence>> {
    let mut days: BTreeMap<NaiveDate, Vec<Occurrence>> = BTreeMap::new();
    for job in jobs {
        for occ in project(job, range_start, range_end) {
            days.entry(occ.date).or_default().push(occ);
        }
    }
    for bucket in days.values_mut() {
        bucket.sort_by(|a, b| {
            let ka = (a.route_index.unwrap_or(u32::MAX), a.job_id.as_str());
            let kb = (b.route_index.unwrap_or(u32::MAX), b.job_id.as_str());
            ka.cmp(&kb)
        });
    }
    days
}
