//! Slot matching: availability checks and alternative ranking.
//!
//! Given a course and a requested time, [`check_availability`] decides
//! whether the requested slot can be booked. When it cannot,
//! [`rank_alternatives`] proposes up to [`MAX_ALTERNATIVES`] replacement
//! slots ordered by similarity to the course and proximity to the request.
//!
//! Both functions are pure: they read the slot list they are given and
//! nothing else.
//!
//! # Usage
//!
//! ```
//! use u_reschedule::matching::{check_availability, rank_alternatives, MatchConstraints, Reason};
//! use u_reschedule::models::{parse_slot_time, Course, Slot, SlotTarget};
//!
//! let course = Course::new("C1").with_teacher("Mr.Li").with_content("Math");
//! let slots = vec![
//!     Slot::new("S1", parse_slot_time("2025-03-10 09:00").unwrap())
//!         .with_teacher("Mr.Li").with_content("Math").with_seats(2, 2),
//!     Slot::new("S2", parse_slot_time("2025-03-11 09:00").unwrap())
//!         .with_teacher("Mr.Li").with_content("Math").with_seats(2, 0),
//! ];
//! let target = SlotTarget::parse("2025-03-10").unwrap();
//! let constraints = MatchConstraints::default();
//!
//! let requested = check_availability(&course, &target, &constraints, &slots);
//! assert_eq!(requested.reason, Reason::Full);
//!
//! let alternatives = rank_alternatives(&course, &target, &constraints, &slots);
//! assert_eq!(alternatives[0].slot_id, "S2");
//! ```

mod availability;
mod ranking;

pub use availability::check_availability;
pub use ranking::{match_score, rank_alternatives, rank_candidates};

use serde::{Deserialize, Serialize};

use crate::models::{Course, Slot, SlotTarget, SLOT_TIME_FORMAT};

/// Maximum number of alternatives returned.
pub const MAX_ALTERNATIVES: usize = 3;

/// Score for a slot with the course's teacher and content.
pub const SCORE_SAME_TEACHER_AND_CONTENT: u32 = 100;
/// Score for a slot with the course's content (when preferred).
pub const SCORE_SAME_CONTENT: u32 = 50;
/// Score for a slot with the course's teacher only.
pub const SCORE_SAME_TEACHER: u32 = 25;

/// Hard and soft matching constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConstraints {
    /// Hard: slots must have the course's teacher.
    #[serde(default = "default_true")]
    pub require_same_teacher: bool,
    /// Soft: rank same-content slots above same-teacher-only slots.
    #[serde(default = "default_true")]
    pub prefer_same_content: bool,
}

fn default_true() -> bool {
    true
}

impl Default for MatchConstraints {
    fn default() -> Self {
        Self {
            require_same_teacher: true,
            prefer_same_content: true,
        }
    }
}

impl MatchConstraints {
    /// Sets the same-teacher requirement.
    pub fn with_require_same_teacher(mut self, required: bool) -> Self {
        self.require_same_teacher = required;
        self
    }

    /// Sets the same-content preference.
    pub fn with_prefer_same_content(mut self, preferred: bool) -> Self {
        self.prefer_same_content = preferred;
        self
    }

    /// Whether `slot` survives the hard constraints for `course`.
    pub fn admits(&self, slot: &Slot, course: &Course) -> bool {
        !self.require_same_teacher || slot.teacher == course.teacher
    }
}

/// Outcome of an availability check.
///
/// Variants are listed in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reason {
    /// The course could not be resolved.
    CourseNotFound,
    /// No slot of the course's content at the requested time.
    NotFound,
    /// Matching slots exist but none has a free seat.
    Full,
    /// A free slot exists but fails a hard constraint.
    InvalidTime,
    /// The requested slot can be booked.
    Available,
}

impl Reason {
    /// Wire code of this reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CourseNotFound => "COURSE_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::Full => "FULL",
            Self::InvalidTime => "INVALID_TIME",
            Self::Available => "AVAILABLE",
        }
    }
}

/// Result for the originally requested time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedResult {
    /// Whether the request can be booked as asked.
    pub available: bool,
    /// Why (or why not).
    pub reason: Reason,
    /// The requested time.
    pub target: SlotTarget,
    /// The slot the request resolved to, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_id: Option<String>,
    /// The course's current time, echoed back for the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_time: Option<String>,
}

impl RequestedResult {
    /// An unavailable result.
    pub fn unavailable(target: SlotTarget, reason: Reason) -> Self {
        Self {
            available: false,
            reason,
            target,
            slot_id: None,
            original_time: None,
        }
    }

    /// An available result resolved to `slot_id`.
    pub fn available(target: SlotTarget, slot_id: impl Into<String>) -> Self {
        Self {
            available: true,
            reason: Reason::Available,
            target,
            slot_id: Some(slot_id.into()),
            original_time: None,
        }
    }

    /// Result for a course that could not be resolved.
    pub fn course_not_found(target: SlotTarget) -> Self {
        Self::unavailable(target, Reason::CourseNotFound)
    }

    /// Attaches the caller's original time.
    pub fn with_original_time(mut self, original_time: Option<String>) -> Self {
        self.original_time = original_time;
        self
    }
}

/// How an alternative relates to the course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFlags {
    /// Same teacher as the course.
    pub same_teacher: bool,
    /// Same content as the course.
    pub same_content: bool,
}

impl MatchFlags {
    /// Compares a slot with a course.
    pub fn between(slot: &Slot, course: &Course) -> Self {
        Self {
            same_teacher: slot.teacher == course.teacher,
            same_content: slot.content == course.content,
        }
    }
}

/// A proposed replacement slot.
///
/// Carries the slot's public fields and the match flags; the ranking score
/// is not exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeSlot {
    /// Slot identifier.
    pub slot_id: String,
    /// Session start (`YYYY-MM-DD HH:MM`).
    pub time: String,
    /// Teacher.
    pub teacher: String,
    /// Content label.
    pub content: String,
    /// Remaining seats.
    pub capacity_left: i64,
    /// Room or venue.
    pub location: String,
    /// Relation to the course.
    #[serde(rename = "match")]
    pub flags: MatchFlags,
}

impl AlternativeSlot {
    /// Projects a slot for the given course.
    pub fn from_slot(slot: &Slot, course: &Course) -> Self {
        Self {
            slot_id: slot.slot_id.clone(),
            time: slot.time.format(SLOT_TIME_FORMAT).to_string(),
            teacher: slot.teacher.clone(),
            content: slot.content.clone(),
            capacity_left: slot.capacity_left(),
            location: slot.location.clone(),
            flags: MatchFlags::between(slot, course),
        }
    }
}
