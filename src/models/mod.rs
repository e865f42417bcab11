//! Scheduling domain models.
//!
//! Core data types for recurring-visit scheduling: the booked [`Job`] with
//! its heterogeneous cadence inputs, the derived [`Occurrence`] projection,
//! the per-territory [`RosterWindow`], and the [`JobSnapshot`] capacity view.
//!
//! Occurrences and cycle keys are always derived, never persisted; the only
//! stored state on a job is its anchor, overrides, and route ordering.

mod job;
mod roster;
mod snapshot;

pub use job::{CadenceFields, Job, Occurrence};
pub use roster::RosterWindow;
pub use snapshot::{JobSnapshot, SnapshotCache};
