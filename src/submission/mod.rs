//! Reschedule submissions.
//!
//! A submission asks to move a course to a specific slot. Two addressing
//! modes share one contract:
//!
//! | Mode | Course lookup | Verification | Slot lookup |
//! |------|---------------|--------------|-------------|
//! | `Keyed` | course key | last 4 phone digits | slot id |
//! | `Named` | student name | none | first bookable slot of the course's content on the date |
//!
//! Failures are returned as [`SubmissionOutcome`] values carrying a
//! [`SubmitFailure`] code. Only store failures are `Err`.

mod handler;

pub use handler::SubmissionHandler;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Slot, SubmitStatus, SLOT_TIME_FORMAT};

/// Estimated review time reported for pending submissions.
pub const PENDING_AUDIT_ETA_SECONDS: u64 = 180;

/// Handler configuration, fixed at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// `true`: accepted submissions finish as `SUCCESS`.
    /// `false`: they finish as `PENDING_AUDIT`.
    pub direct_success: bool,
}

impl SubmissionConfig {
    /// Accepted submissions are confirmed immediately.
    pub fn direct_success() -> Self {
        Self {
            direct_success: true,
        }
    }

    /// Accepted submissions wait for review.
    pub fn pending_audit() -> Self {
        Self {
            direct_success: false,
        }
    }

    /// Status given to an accepted submission.
    pub fn accepted_status(&self) -> SubmitStatus {
        if self.direct_success {
            SubmitStatus::Success
        } else {
            SubmitStatus::PendingAudit
        }
    }
}

/// Keyed-mode verification token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    /// Last 4 digits of the phone number on file.
    pub phone_last4: String,
}

impl Verification {
    /// Creates a phone-digits token.
    pub fn phone_last4(digits: impl Into<String>) -> Self {
        Self {
            phone_last4: digits.into(),
        }
    }
}

/// A reschedule submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SubmissionRequest {
    /// Course key + verification + explicit slot.
    Keyed {
        course_key: String,
        slot_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        verification: Option<Verification>,
    },
    /// Student name + target date.
    Named {
        student_name: String,
        target_date: NaiveDate,
    },
}

impl SubmissionRequest {
    /// Keyed request.
    pub fn keyed(
        course_key: impl Into<String>,
        slot_id: impl Into<String>,
        verification: Option<Verification>,
    ) -> Self {
        Self::Keyed {
            course_key: course_key.into(),
            slot_id: slot_id.into(),
            verification,
        }
    }

    /// Named request.
    pub fn named(student_name: impl Into<String>, target_date: NaiveDate) -> Self {
        Self::Named {
            student_name: student_name.into(),
            target_date,
        }
    }
}

/// Why a submission was rejected. Variants follow check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmitFailure {
    /// Keyed: unknown course key.
    CourseNotFound,
    /// Named: unknown student.
    StudentNotFound,
    /// Keyed: token missing or not equal to the stored secret.
    VerificationMismatch,
    /// Keyed: unknown slot id.
    SlotNotFound,
    /// Named: no bookable slot of the course's content on the date.
    SlotNotFoundOrFull,
    /// Keyed: slot has no free seat.
    SlotFull,
}

impl SubmitFailure {
    /// Wire code of this failure.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CourseNotFound => "COURSE_NOT_FOUND",
            Self::StudentNotFound => "STUDENT_NOT_FOUND",
            Self::VerificationMismatch => "VERIFICATION_MISMATCH",
            Self::SlotNotFound => "SLOT_NOT_FOUND",
            Self::SlotNotFoundOrFull => "SLOT_NOT_FOUND_OR_FULL",
            Self::SlotFull => "SLOT_FULL",
        }
    }
}

/// Review details for pending submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditInfo {
    /// Estimated seconds until review completes.
    pub eta_seconds: u64,
}

/// The course's schedule after an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedSchedule {
    /// New session time (`YYYY-MM-DD HH:MM`).
    pub time: String,
    /// New teacher.
    pub teacher: String,
    /// New location.
    pub location: String,
}

impl UpdatedSchedule {
    fn from_slot(slot: &Slot) -> Self {
        Self {
            time: slot.time.format(SLOT_TIME_FORMAT).to_string(),
            teacher: slot.teacher.clone(),
            location: slot.location.clone(),
        }
    }
}

/// Result of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    /// Final status.
    pub result: SubmitStatus,
    /// Failure code, or a short confirmation text.
    pub message: String,
    /// Failure reason for callers that branch on it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<SubmitFailure>,
    /// Present for `PENDING_AUDIT`.
    pub audit: Option<AuditInfo>,
    /// Present for accepted submissions.
    pub updated_schedule: Option<UpdatedSchedule>,
}

impl SubmissionOutcome {
    /// A rejected submission.
    pub fn failed(reason: SubmitFailure) -> Self {
        Self {
            result: SubmitStatus::Failed,
            message: reason.as_str().to_string(),
            reason: Some(reason),
            audit: None,
            updated_schedule: None,
        }
    }

    /// An accepted submission for `slot` with the given status.
    pub fn accepted(status: SubmitStatus, slot: &Slot) -> Self {
        let (message, audit) = match status {
            SubmitStatus::PendingAudit => (
                "request submitted",
                Some(AuditInfo {
                    eta_seconds: PENDING_AUDIT_ETA_SECONDS,
                }),
            ),
            _ => ("schedule change confirmed", None),
        };
        Self {
            result: status,
            message: message.to_string(),
            reason: None,
            audit,
            updated_schedule: Some(UpdatedSchedule::from_slot(slot)),
        }
    }

    /// Whether the submission was accepted.
    pub fn is_accepted(&self) -> bool {
        self.result != SubmitStatus::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_slot_time;

    #[test]
    fn test_config_status() {
        assert_eq!(SubmissionConfig::default().accepted_status(), SubmitStatus::PendingAudit);
        assert_eq!(SubmissionConfig::direct_success().accepted_status(), SubmitStatus::Success);
        assert_eq!(SubmissionConfig::pending_audit(), SubmissionConfig::default());
    }

    #[test]
    fn test_request_tagging() {
        let keyed: SubmissionRequest = serde_json::from_str(
            r#"{"mode":"keyed","course_key":"C1","slot_id":"S2","verification":{"phone_last4":"1234"}}"#,
        )
        .unwrap();
        assert_eq!(
            keyed,
            SubmissionRequest::keyed("C1", "S2", Some(Verification::phone_last4("1234")))
        );

        let named: SubmissionRequest =
            serde_json::from_str(r#"{"mode":"named","student_name":"Alice","target_date":"2025-03-10"}"#)
                .unwrap();
        assert!(matches!(named, SubmissionRequest::Named { .. }));

        // A keyed request without a slot id is malformed, not a named one.
        assert!(serde_json::from_str::<SubmissionRequest>(r#"{"mode":"keyed","course_key":"C1"}"#).is_err());
    }

    #[test]
    fn test_failed_outcome() {
        let o = SubmissionOutcome::failed(SubmitFailure::VerificationMismatch);
        assert_eq!(o.result, SubmitStatus::Failed);
        assert_eq!(o.message, "VERIFICATION_MISMATCH");
        assert!(!o.is_accepted());
        assert!(o.audit.is_none() && o.updated_schedule.is_none());
    }

    #[test]
    fn test_accepted_outcomes() {
        let slot = Slot::new("S1", parse_slot_time("2025-03-12 14:00").unwrap())
            .with_teacher("Mr.Li")
            .with_location("Room 3");

        let pending = SubmissionOutcome::accepted(SubmitStatus::PendingAudit, &slot);
        assert_eq!(pending.audit, Some(AuditInfo { eta_seconds: 180 }));
        assert_eq!(pending.updated_schedule.as_ref().unwrap().time, "2025-03-12 14:00");

        let done = SubmissionOutcome::accepted(SubmitStatus::Success, &slot);
        assert!(done.audit.is_none());
        assert_eq!(done.updated_schedule.unwrap().location, "Room 3");
    }
}
