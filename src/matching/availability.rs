//! Availability check for the requested slot.
//!
//! # Algorithm
//!
//! 1. Collect slots with the course's content at the target
//!    (exact minute or whole day, per [`SlotTarget`]).
//! 2. None → `NOT_FOUND`.
//! 3. None with a free seat → `FULL`.
//! 4. None with a free seat that passes the hard constraints → `INVALID_TIME`.
//! 5. Otherwise → `AVAILABLE`, resolved to the first such slot in store order.
//!
//! With a date target several slots can match; the check succeeds if any
//! of them is bookable, which keeps it consistent with name-mode
//! submissions that take the first bookable slot of the day.

use super::{MatchConstraints, Reason, RequestedResult};
use crate::models::{Course, Slot, SlotTarget};

/// Checks whether `course` can be moved to `target`.
pub fn check_availability(
    course: &Course,
    target: &SlotTarget,
    constraints: &MatchConstraints,
    slots: &[Slot],
) -> RequestedResult {
    let at_target: Vec<&Slot> = slots
        .iter()
        .filter(|s| s.content == course.content && target.matches(s.time))
        .collect();

    if at_target.is_empty() {
        return RequestedResult::unavailable(*target, Reason::NotFound);
    }

    let mut open = at_target.into_iter().filter(|s| s.is_bookable()).peekable();
    if open.peek().is_none() {
        return RequestedResult::unavailable(*target, Reason::Full);
    }

    match open.find(|s| constraints.admits(s, course)) {
        Some(slot) => RequestedResult::available(*target, slot.slot_id.clone()),
        None => RequestedResult::unavailable(*target, Reason::InvalidTime),
    }
}
