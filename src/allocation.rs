//! Capacity-aware slot allocation.
//!
//! Invoked once per payment confirmation: given the pending job's value and
//! a snapshot of every currently booked job, search a rolling lookahead
//! window for dates that have roster coverage and room under the daily
//! revenue ceiling, and return a short list of labeled options.
//!
//! # Algorithm
//! Greedy first-fit in date order, tomorrow through the lookahead horizon:
//! skip days with no rostered cleaner for that day-of-cycle, skip days
//! whose booked value plus the pending value would breach the ceiling,
//! accept the rest until `max_slots` are collected. Earliest good-enough
//! dates beat global optimality — the customer only needs a few valid
//! choices.
//!
//! A missing or empty roster yields an empty result, as does a fully
//! loaded window. Neither is an error; the caller decides how to message
//! the customer.

use chrono::{Duration, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::cycle::CycleCalendar;
use crate::models::{JobSnapshot, RosterWindow};

/// Days scanned past today by default.
pub const DEFAULT_LOOKAHEAD_DAYS: u32 = 120;
/// Default daily booked-value ceiling.
pub const DEFAULT_CEILING: f64 = 400.0;
/// Default maximum number of offered slots.
pub const DEFAULT_MAX_SLOTS: usize = 5;
/// Fixed day cycle used by the capacity-side occurrence check. Matches the
/// 4-week roster cycle; jobs on other cadences are accounted on this cycle
/// deliberately so capacity and roster lookups share one modulus.
pub const CAPACITY_CYCLE_DAYS: i64 = 28;

/// Parameters for one allocation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotRequest {
    /// Value of the job awaiting a slot.
    pub pending_value: f64,
    /// The "today" the window is anchored on; candidates start tomorrow.
    pub today: NaiveDate,
    /// Window length in days past today.
    pub lookahead_days: u32,
    /// Daily booked-value ceiling.
    pub ceiling: f64,
    /// Maximum slots to return.
    pub max_slots: usize,
}

impl SlotRequest {
    /// Creates a request with the default window, ceiling, and slot count.
    pub fn new(pending_value: f64, today: NaiveDate) -> Self {
        Self {
            pending_value,
            today,
            lookahead_days: DEFAULT_LOOKAHEAD_DAYS,
            ceiling: DEFAULT_CEILING,
            max_slots: DEFAULT_MAX_SLOTS,
        }
    }

    /// Sets the lookahead window length.
    pub fn with_lookahead_days(mut self, days: u32) -> Self {
        self.lookahead_days = days;
        self
    }

    /// Sets the daily value ceiling.
    pub fn with_ceiling(mut self, ceiling: f64) -> Self {
        self.ceiling = ceiling;
        self
    }

    /// Sets the maximum number of slots.
    pub fn with_max_slots(mut self, max_slots: usize) -> Self {
        self.max_slots = max_slots;
        self
    }
}

/// One offered booking slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotOption {
    /// Candidate visit date.
    pub date: NaiveDate,
    /// Week-in-cycle key, `"week1".."week4"`.
    pub week_key: String,
    /// Day key, `"Mon".."Sun"`.
    pub day_key: String,
    /// First cleaner rostered for the slot's day-of-cycle.
    pub cleaner_id: String,
    /// Customer-facing label, e.g. `"Monday Week 1 - 01/12/2025"`.
    pub label: String,
}

/// Searches the lookahead window for capacity-respecting slots.
///
/// `booked` is the read-mostly snapshot of currently booked jobs, fetched
/// once by the caller (see `SnapshotCache`); the allocator performs no I/O.
/// Returns at most `request.max_slots` options in date order; empty when
/// the roster has no coverage or the window is full.
pub fn allocate(
    request: &SlotRequest,
    roster: &RosterWindow,
    booked: &[JobSnapshot],
    cycle: &CycleCalendar,
) -> Vec<SlotOption> {
    if roster.is_empty() {
        debug!("allocation aborted: empty roster");
        return Vec::new();
    }

    let pending = if request.pending_value.is_finite() {
        request.pending_value.max(0.0)
    } else {
        0.0
    };
    let horizon = request.today + Duration::days(i64::from(request.lookahead_days));
    let mut slots = Vec::new();

    let mut cursor = request.today + Duration::days(1);
    while cursor <= horizon && slots.len() < request.max_slots {
        let key = cycle.cycle_key(cursor);
        let week_key = key.week_key();
        let day_key = key.day_key();

        let cleaners = roster.cleaners_for(&week_key, day_key);
        if cleaners.is_empty() {
            cursor += Duration::days(1);
            continue;
        }

        let existing = day_value(cursor, booked);
        if existing + pending > request.ceiling {
            debug!(
                "slot {cursor} skipped: {existing:.2} + {pending:.2} exceeds {:.2}",
                request.ceiling
            );
            cursor += Duration::days(1);
            continue;
        }

        slots.push(SlotOption {
            date: cursor,
            week_key: week_key.clone(),
            day_key: day_key.to_string(),
            cleaner_id: cleaners[0].clone(),
            label: slot_label(cursor, &week_key),
        });
        cursor += Duration::days(1);
    }

    slots
}

/// Total booked value landing on a date.
///
/// A snapshot contributes when the date sits a non-negative whole multiple
/// of [`CAPACITY_CYCLE_DAYS`] after its anchor. Malformed values count as 0.
pub fn day_value(date: NaiveDate, booked: &[JobSnapshot]) -> f64 {
    booked
        .iter()
        .filter(|snap| occurs_on(snap, date))
        .map(JobSnapshot::effective_value)
        .sum()
}

fn occurs_on(snap: &JobSnapshot, date: NaiveDate) -> bool {
    let Some(anchor) = snap.anchor_date else {
        return false;
    };
    let diff = (date - anchor).num_days();
    diff >= 0 && diff % CAPACITY_CYCLE_DAYS == 0
}

/// Customer-facing slot label: full weekday name, cycle week number, and
/// the date in `dd/mm/yyyy`.
fn slot_label(date: NaiveDate, week_key: &str) -> String {
    let week_number = week_key.trim_start_matches("week");
    format!(
        "{} Week {} - {}",
        date.format("%A"),
        week_number,
        date.format("%d/%m/%Y")
    )
}
