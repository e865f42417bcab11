//! Recurring-visit scheduling engine for round-based service businesses.
//!
//! Customers are booked onto a repeating visit cadence (nominally every
//! 28 days). This crate provides the pure scheduling core: projecting
//! future visit dates from an anchor booking, rescheduling individual
//! visits without breaking the recurrence chain, and offering customers
//! valid future booking slots that respect roster coverage and a daily
//! revenue ceiling.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Job`, `CadenceFields`, `Occurrence`,
//!   `RosterWindow`, `JobSnapshot`, `SnapshotCache`
//! - **`cadence`**: Repeat-interval resolution from heterogeneous inputs
//! - **`cycle`**: `(week-in-cycle, weekday)` keys over a fixed 4-week pattern
//! - **`occurrence`**: Anchor + cadence + override expansion over a range
//! - **`reschedule`**: Anchor moves and within-day route reordering
//! - **`allocation`**: Capacity-aware booking slot search
//! - **`validation`**: Snapshot integrity checks
//!
//! # Architecture
//!
//! Everything here is synchronous, CPU-bound date arithmetic; the crate
//! performs no I/O. Storage reads arrive as parameters (job snapshots,
//! roster windows) and writes leave as patch values (`AnchorMove`,
//! `RouteOrderPatch`, accepted `SlotOption`s) for an external persistence
//! writer. All loops are bounded by explicit step ceilings or fixed
//! windows, so every call terminates quickly without cancellation support.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use round_schedule::allocation::{allocate, SlotRequest};
//! use round_schedule::cycle::CycleCalendar;
//! use round_schedule::models::{JobSnapshot, RosterWindow};
//!
//! let roster = RosterWindow::new()
//!     .with_day("week1", "Mon", vec!["alice".into()]);
//! let booked = vec![JobSnapshot::new(
//!     "J1",
//!     NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
//!     45.0,
//! )];
//!
//! let request = SlotRequest::new(50.0, NaiveDate::from_ymd_opt(2025, 11, 3).unwrap());
//! let slots = allocate(&request, &roster, &booked, &CycleCalendar::default());
//! assert!(slots.len() <= 5);
//! ```

pub mod allocation;
pub mod cadence;
pub mod cycle;
pub mod date;
pub mod error;
pub mod models;
pub mod occurrence;
pub mod reschedule;
pub mod validation;

pub use error::ScheduleError;
