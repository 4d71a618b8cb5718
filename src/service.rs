//! Transport-agnostic entry points.
//!
//! [`ScheduleService`] ties a [`RecordStore`] to the matcher and the
//! submission handler. HTTP, RPC or CLI bindings call these two methods
//! with plain values and serialize the plain results.
//!
//! Store failures surface as [`ScheduleError::Store`]; business outcomes
//! are values inside the responses.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::ServiceConfig;
use crate::error::{ScheduleError, StoreError};
use crate::matching::{
    check_availability, rank_alternatives, AlternativeSlot, MatchConstraints, RequestedResult,
};
use crate::models::{Course, SlotTarget};
use crate::store::{JsonFileStore, RecordStore};
use crate::submission::{SubmissionConfig, SubmissionHandler, SubmissionOutcome, SubmissionRequest};
use crate::validation::{validate_records, ValidationResult};

/// How a query names its course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum CourseRef {
    /// By course key.
    Key(String),
    /// By content label (first course teaching it).
    Content(String),
}

/// An availability query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The course to move.
    pub course: CourseRef,
    /// The course's current time, echoed back unchanged.
    #[serde(default)]
    pub original_time: Option<String>,
    /// Where the course should move to.
    pub target: SlotTarget,
    /// Matching constraints.
    #[serde(default)]
    pub constraints: MatchConstraints,
}

impl QueryRequest {
    /// Creates a query with default constraints.
    pub fn new(course: CourseRef, target: SlotTarget) -> Self {
        Self {
            course,
            original_time: None,
            target,
            constraints: MatchConstraints::default(),
        }
    }

    /// Sets the original time.
    pub fn with_original_time(mut self, original_time: impl Into<String>) -> Self {
        self.original_time = Some(original_time.into());
        self
    }

    /// Sets the constraints.
    pub fn with_constraints(mut self, constraints: MatchConstraints) -> Self {
        self.constraints = constraints;
        self
    }
}

/// Answer to an availability query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Outcome for the requested time.
    pub requested: RequestedResult,
    /// Ranked replacements; empty when the request is available.
    pub alternatives: Vec<AlternativeSlot>,
}

/// Rescheduling service over a record store.
#[derive(Debug)]
pub struct ScheduleService<S> {
    store: S,
    submissions: SubmissionHandler,
}

impl ScheduleService<JsonFileStore> {
    /// Opens the JSON store named by `config`.
    pub fn open(config: &ServiceConfig) -> Self {
        Self::new(JsonFileStore::open(&config.db_path), config.submission())
    }
}

impl<S: RecordStore> ScheduleService<S> {
    /// Creates a service over `store`.
    pub fn new(store: S, config: SubmissionConfig) -> Self {
        Self {
            store,
            submissions: SubmissionHandler::new(config),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Checks the requested time and, if it is unavailable, ranks
    /// alternatives.
    #[instrument(skip_all, fields(target = %request.target))]
    pub fn query_available_slots(
        &self,
        request: &QueryRequest,
    ) -> Result<QueryResponse, ScheduleError> {
        let Some(course) = self.resolve_course(&request.course)? else {
            debug!(course = ?request.course, "course not found");
            return Ok(QueryResponse {
                requested: RequestedResult::course_not_found(request.target)
                    .with_original_time(request.original_time.clone()),
                alternatives: Vec::new(),
            });
        };

        let slots = self.store.list_slots()?;
        let requested = check_availability(&course, &request.target, &request.constraints, &slots)
            .with_original_time(request.original_time.clone());

        let alternatives = if requested.available {
            Vec::new()
        } else {
            rank_alternatives(&course, &request.target, &request.constraints, &slots)
        };

        info!(
            course_key = %course.course_key,
            reason = requested.reason.as_str(),
            alternatives = alternatives.len(),
            "availability query answered"
        );

        Ok(QueryResponse {
            requested,
            alternatives,
        })
    }

    /// Records a reschedule submission.
    #[instrument(skip_all)]
    pub fn submit_schedule_change(
        &self,
        request: &SubmissionRequest,
    ) -> Result<SubmissionOutcome, ScheduleError> {
        Ok(self.submissions.submit(&self.store, request)?)
    }

    /// Validates the store's course and slot records.
    pub fn validate_records(&self) -> Result<ValidationResult, ScheduleError> {
        let courses = self.store.list_courses()?;
        let slots = self.store.list_slots()?;
        Ok(validate_records(&courses, &slots))
    }

    fn resolve_course(&self, course: &CourseRef) -> Result<Option<Course>, StoreError> {
        match course {
            CourseRef::Key(key) => self.store.find_course_by_key(key),
            CourseRef::Content(content) => self.store.find_course_by_content(content),
        }
    }
}
