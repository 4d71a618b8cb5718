//! Record store: flat access to courses, slots and the submission log.
//!
//! The store is deliberately simple: three ordered collections, read in
//! full, with one append-only write path. Lookups return the first match
//! in store order.
//!
//! # Implementations
//!
//! - [`InMemoryStore`]: `RwLock`-guarded collections, for tests and embedding.
//! - [`JsonFileStore`]: a single `db.json` file, reloaded on every read and
//!   rewritten under a mutex on every append.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::models::{Course, Slot, SubmissionRecord};

/// The full contents of a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    /// Course registry.
    #[serde(default)]
    pub courses: Vec<Course>,
    /// Slot registry.
    #[serde(default)]
    pub slots: Vec<Slot>,
    /// Submission audit log.
    #[serde(default, rename = "requests")]
    pub submissions: Vec<SubmissionRecord>,
}

impl Database {
    /// Creates a database from courses and slots with an empty log.
    pub fn new(courses: Vec<Course>, slots: Vec<Slot>) -> Self {
        Self {
            courses,
            slots,
            submissions: Vec::new(),
        }
    }
}

/// Read/append access to scheduling records.
///
/// Only `list_*` and `append_submission` are required; lookups default to
/// a linear scan in store order.
pub trait RecordStore: Send + Sync {
    /// All courses, in store order.
    fn list_courses(&self) -> Result<Vec<Course>, StoreError>;

    /// All slots, in store order.
    fn list_slots(&self) -> Result<Vec<Slot>, StoreError>;

    /// The audit log, oldest first.
    fn list_submissions(&self) -> Result<Vec<SubmissionRecord>, StoreError>;

    /// Appends one record to the audit log.
    fn append_submission(&self, record: SubmissionRecord) -> Result<(), StoreError>;

    /// Finds a course by its key.
    fn find_course_by_key(&self, course_key: &str) -> Result<Option<Course>, StoreError> {
        Ok(self
            .list_courses()?
            .into_iter()
            .find(|c| c.course_key == course_key))
    }

    /// Finds a course by its student's name.
    fn find_course_by_student_name(&self, name: &str) -> Result<Option<Course>, StoreError> {
        Ok(self
            .list_courses()?
            .into_iter()
            .find(|c| c.student_name == name))
    }

    /// Finds the first course teaching the given content.
    fn find_course_by_content(&self, content: &str) -> Result<Option<Course>, StoreError> {
        Ok(self
            .list_courses()?
            .into_iter()
            .find(|c| c.content == content))
    }

    /// Finds a slot by id.
    fn find_slot_by_id(&self, slot_id: &str) -> Result<Option<Slot>, StoreError> {
        Ok(self
            .list_slots()?
            .into_iter()
            .find(|s| s.slot_id == slot_id))
    }
}
