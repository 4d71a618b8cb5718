//! Submission handler.
//!
//! # Check order
//!
//! 1. Resolve the course (`COURSE_NOT_FOUND` / `STUDENT_NOT_FOUND`).
//! 2. Keyed only: verify the token (`VERIFICATION_MISMATCH`).
//! 3. Resolve the slot (`SLOT_NOT_FOUND` / `SLOT_NOT_FOUND_OR_FULL`).
//! 4. Keyed only: require a free seat (`SLOT_FULL`).
//! 5. Append one audit record and report the configured status.
//!
//! Seat counts are read, never decremented.

use chrono::NaiveDate;
use tracing::{debug, info};

use super::{SubmissionConfig, SubmissionOutcome, SubmissionRequest, SubmitFailure, Verification};
use crate::error::StoreError;
use crate::models::{Course, Requester, Slot, SubmissionRecord};
use crate::store::RecordStore;

/// Validates submissions and records accepted ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionHandler {
    config: SubmissionConfig,
}

impl SubmissionHandler {
    /// Creates a handler with a fixed configuration.
    pub fn new(config: SubmissionConfig) -> Self {
        Self { config }
    }

    /// The handler's configuration.
    pub fn config(&self) -> &SubmissionConfig {
        &self.config
    }

    /// Processes one submission against `store`.
    pub fn submit<S: RecordStore + ?Sized>(
        &self,
        store: &S,
        request: &SubmissionRequest,
    ) -> Result<SubmissionOutcome, StoreError> {
        let resolved = match request {
            SubmissionRequest::Keyed {
                course_key,
                slot_id,
                verification,
            } => resolve_keyed(store, course_key, slot_id, verification.as_ref())?,
            SubmissionRequest::Named {
                student_name,
                target_date,
            } => resolve_named(store, student_name, *target_date)?,
        };

        let (requester, slot) = match resolved {
            Ok(accepted) => accepted,
            Err(reason) => {
                debug!(reason = reason.as_str(), "submission rejected");
                return Ok(SubmissionOutcome::failed(reason));
            }
        };

        let status = self.config.accepted_status();
        store.append_submission(SubmissionRecord::new(requester, &slot.slot_id, status))?;
        info!(slot_id = %slot.slot_id, status = status.as_str(), "submission recorded");

        Ok(SubmissionOutcome::accepted(status, &slot))
    }
}

type Resolution = Result<(Requester, Slot), SubmitFailure>;

fn resolve_keyed<S: RecordStore + ?Sized>(
    store: &S,
    course_key: &str,
    slot_id: &str,
    verification: Option<&Verification>,
) -> Result<Resolution, StoreError> {
    let Some(course) = store.find_course_by_key(course_key)? else {
        return Ok(Err(SubmitFailure::CourseNotFound));
    };

    if !verification.is_some_and(|v| course.verify(&v.phone_last4)) {
        return Ok(Err(SubmitFailure::VerificationMismatch));
    }

    let Some(slot) = store.find_slot_by_id(slot_id)? else {
        return Ok(Err(SubmitFailure::SlotNotFound));
    };

    if !slot.is_bookable() {
        return Ok(Err(SubmitFailure::SlotFull));
    }

    Ok(Ok((Requester::CourseKey(course.course_key), slot)))
}

fn resolve_named<S: RecordStore + ?Sized>(
    store: &S,
    student_name: &str,
    target_date: NaiveDate,
) -> Result<Resolution, StoreError> {
    let Some(course) = store.find_course_by_student_name(student_name)? else {
        return Ok(Err(SubmitFailure::StudentNotFound));
    };

    match first_bookable_on(&store.list_slots()?, &course, target_date) {
        Some(slot) => Ok(Ok((Requester::StudentName(student_name.to_string()), slot.clone()))),
        None => Ok(Err(SubmitFailure::SlotNotFoundOrFull)),
    }
}

fn first_bookable_on<'a>(slots: &'a [Slot], course: &Course, date: NaiveDate) -> Option<&'a Slot> {
    slots
        .iter()
        .find(|s| s.content == course.content && s.time.date() == date && s.is_bookable())
}
