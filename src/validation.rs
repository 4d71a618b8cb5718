//! Record validation.
//!
//! Checks structural integrity of course and slot data before it is
//! served. Detects:
//! - Duplicate course keys and slot ids
//! - Empty identifiers
//! - Overbooked slots (`booked > capacity`)
//! - Slots whose content no course takes
//! - Courses whose content no slot teaches
//!
//! All issues are collected; validation does not stop at the first one.

use std::collections::HashSet;

use crate::models::{Course, Slot};

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
    /// Two records share the same identifier.
    DuplicateId,
    /// A record has an empty identifier.
    EmptyId,
    /// A slot has more bookings than seats.
    Overbooked,
    /// A slot's content is not taken by any course.
    UnknownContent,
    /// A course's content is not taught by any slot.
    UnusedCourse,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates course and slot records.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_records(courses: &[Course], slots: &[Slot]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut course_keys = HashSet::new();
    let mut contents = HashSet::new();
    for course in courses {
        if course.course_key.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                format!("Course for student '{}' has an empty key", course.student_name),
            ));
        } else if !course_keys.insert(course.course_key.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course key: {}", course.course_key),
            ));
        }
        contents.insert(course.content.as_str());
    }

    let mut slot_ids = HashSet::new();
    let mut slot_contents = HashSet::new();
    for slot in slots {
        slot_contents.insert(slot.content.as_str());

        if slot.slot_id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                format!("Slot at {} has an empty id", slot.time),
            ));
        } else if !slot_ids.insert(slot.slot_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate slot ID: {}", slot.slot_id),
            ));
        }

        if slot.booked > slot.capacity {
            errors.push(ValidationError::new(
                ValidationErrorKind::Overbooked,
                format!(
                    "Slot '{}' has {} bookings for {} seats",
                    slot.slot_id, slot.booked, slot.capacity
                ),
            ));
        }

        if !contents.contains(slot.content.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownContent,
                format!(
                    "Slot '{}' teaches '{}', which no course takes",
                    slot.slot_id, slot.content
                ),
            ));
        }
    }

    for course in courses {
        if !slot_contents.contains(course.content.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnusedCourse,
                format!(
                    "Course '{}' takes '{}', which no slot teaches",
                    course.course_key, course.content
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
