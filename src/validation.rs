//! Input validation for seat allocation.
//!
//! Checks structural integrity of the roster and room list before
//! scheduling. Detects:
//! - Duplicate participant IDs
//! - Duplicate room IDs
//! - Rooms with non-positive capacity
//! - Rooms with a blank building or room name
//!
//! The allocator tolerates every one of these (duplicates are skipped,
//! unusable rooms never enter the grid), so validation is an opt-in gate
//! for callers that prefer to reject such input outright.

use crate::models::{Participant, Room};
use std::collections::HashSet;

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
    /// Two participants share the same ID.
    DuplicateParticipantId,
    /// Two rooms share the same ID.
    DuplicateRoomId,
    /// A room has capacity `<= 0`.
    NonPositiveCapacity,
    /// A room has an empty building or room name.
    BlankRoomName,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for one allocation run.
///
/// Checks:
/// 1. No duplicate participant IDs
/// 2. No duplicate room IDs
/// 3. Every room has positive capacity
/// 4. Every room has a non-blank building and room name
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(participants: &[Participant], rooms: &[Room]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut participant_ids = HashSet::new();
    for p in participants {
        if !participant_ids.insert(p.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateParticipantId,
                format!("Duplicate participant ID: {}", p.id),
            ));
        }
    }

    let mut room_ids = HashSet::new();
    for r in rooms {
        if !room_ids.insert(r.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateRoomId,
                format!("Duplicate room ID: {}", r.id),
            ));
        }

        if r.capacity <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveCapacity,
                format!("Room {} has non-positive capacity {}", r.id, r.capacity),
            ));
        }

        if r.building.trim().is_empty() || r.room.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankRoomName,
                format!("Room {} has a blank building or room name", r.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
