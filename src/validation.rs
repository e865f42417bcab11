//! Input validation for booked-job snapshots.
//!
//! Advisory pre-flight for allocation callers: the allocator itself
//! tolerates bad records (malformed values count as zero, undated records
//! contribute nothing), but silent tolerance hides data-quality problems.
//! Running the snapshot set through `validate_snapshots` surfaces them
//! without changing allocation behavior.

use std::collections::HashSet;

use crate::models::JobSnapshot;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two snapshots share the same ID.
    DuplicateId,
    /// A booked record has no anchor date.
    MissingAnchor,
    /// A record's value is zero, negative, or not finite.
    NonPositiveValue,
    /// A record carries a zero cadence.
    InvalidCadence,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a booked-job snapshot set ahead of capacity accounting.
///
/// Checks:
/// 1. No duplicate snapshot IDs
/// 2. Every record has an anchor date
/// 3. Values are finite and positive
/// 4. Any present cadence is at least 1 day
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshots(snapshots: &[JobSnapshot]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for snap in snapshots {
        if !ids.insert(snap.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate job ID: {}", snap.id),
            ));
        }

        if snap.anchor_date.is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingAnchor,
                format!("Job '{}' is booked but has no anchor date", snap.id),
            ));
        }

        if !snap.value.is_finite() || snap.value <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveValue,
                format!("Job '{}' has non-positive value {}", snap.id, snap.value),
            ));
        }

        if snap.cadence_days == Some(0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCadence,
                format!("Job '{}' has a zero cadence", snap.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
