//! Booked-job snapshots for capacity accounting.
//!
//! Capacity checks need the full set of currently booked jobs, which is an
//! I/O-bound fetch in the surrounding system. The engine stays pure by
//! accepting the fetched set as a parameter; [`SnapshotCache`] gives callers
//! an explicit, TTL-bounded place to hold it between allocation calls
//! instead of a hidden module-level cache.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Minimal view of a booked job, as read from the job store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSnapshot {
    /// Externally-owned identifier.
    pub id: String,
    /// Anchor of the job's occurrence series. `None` means the record is
    /// booked but not yet dated; it contributes nothing to any day total.
    pub anchor_date: Option<NaiveDate>,
    /// Resolved cadence, when the record carries one.
    pub cadence_days: Option<u32>,
    /// Value per occurrence. Malformed upstream values should be mapped to
    /// a non-finite number or left at zero; both are treated as 0.
    #[serde(default)]
    pub value: f64,
}

impl JobSnapshot {
    /// Creates a snapshot with an anchor and value.
    pub fn new(id: impl Into<String>, anchor_date: NaiveDate, value: f64) -> Self {
        Self {
            id: id.into(),
            anchor_date: Some(anchor_date),
            cadence_days: None,
            value,
        }
    }

    /// Value with malformed inputs flattened to zero.
    pub fn effective_value(&self) -> f64 {
        if self.value.is_finite() && self.value > 0.0 {
            self.value
        } else {
            0.0
        }
    }
}

/// Read-mostly snapshot holder with an explicit TTL.
///
/// The cache never fetches; the caller supplies the fetch closure and the
/// cache decides whether to run it. Lifecycle and invalidation are visible
/// rather than implicit.
#[derive(Debug)]
pub struct SnapshotCache {
    ttl: Duration,
    entry: Option<(Instant, Vec<JobSnapshot>)>,
}

impl SnapshotCache {
    /// Creates an empty cache with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// Returns the cached snapshots, refreshing via `fetch` when the entry
    /// is absent or older than the TTL.
    pub fn get_or_refresh_with<F>(&mut self, fetch: F) -> &[JobSnapshot]
    where
        F: FnOnce() -> Vec<JobSnapshot>,
    {
        let stale = match &self.entry {
            None => true,
            Some((at, _)) => at.elapsed() >= self.ttl,
        };
        if stale {
            self.entry = Some((Instant::now(), fetch()));
        }
        match &self.entry {
            Some((_, snapshots)) => snapshots,
            None => &[],
        }
    }

    /// Drops the cached entry; the next read refetches.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Whether a live (non-expired) entry is held.
    pub fn is_fresh(&self) -> bool {
        matches!(&self.entry, Some((at, _)) if at.elapsed() < self.ttl)
    }
}
