//! In-memory record store.

use std::sync::RwLock;

use tracing::debug;

use super::{Database, RecordStore};
use crate::error::StoreError;
use crate::models::{Course, Slot, SubmissionRecord};

/// A store holding all records in memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    db: RwLock<Database>,
}

impl InMemoryStore {
    /// Creates a store with the given courses and slots and an empty log.
    pub fn new(courses: Vec<Course>, slots: Vec<Slot>) -> Self {
        Self::from_database(Database::new(courses, slots))
    }

    /// Creates a store from a full database snapshot.
    pub fn from_database(db: Database) -> Self {
        Self {
            db: RwLock::new(db),
        }
    }

    /// Returns a copy of the current contents.
    pub fn snapshot(&self) -> Result<Database, StoreError> {
        self.read(Database::clone)
    }

    fn read<T>(&self, f: impl FnOnce(&Database) -> T) -> Result<T, StoreError> {
        let db = self.db.read().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&db))
    }
}

impl RecordStore for InMemoryStore {
    fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        self.read(|db| db.courses.clone())
    }

    fn list_slots(&self) -> Result<Vec<Slot>, StoreError> {
        self.read(|db| db.slots.clone())
    }

    fn list_submissions(&self) -> Result<Vec<SubmissionRecord>, StoreError> {
        self.read(|db| db.submissions.clone())
    }

    fn append_submission(&self, record: SubmissionRecord) -> Result<(), StoreError> {
        let mut db = self.db.write().map_err(|_| StoreError::Poisoned)?;
        debug!(slot_id = %record.slot_id, status = record.status.as_str(), "appending submission");
        db.submissions.push(record);
        Ok(())
    }

    fn find_course_by_key(&self, course_key: &str) -> Result<Option<Course>, StoreError> {
        self.read(|db| {
            db.courses
                .iter()
                .find(|c| c.course_key == course_key)
                .cloned()
        })
    }

    fn find_slot_by_id(&self, slot_id: &str) -> Result<Option<Slot>, StoreError> {
        self.read(|db| db.slots.iter().find(|s| s.slot_id == slot_id).cloned())
    }
}
