//! JSON file record store.
//!
//! # Layout
//! One file holding `{"courses": [...], "slots": [...], "requests": [...]}`.
//! Missing collections read as empty.
//!
//! # Writes
//! Appends reload the whole file, push the record and write the file back.
//! The cycle runs under a mutex so appends from one process never lose
//! each other's records. The new contents go to a sibling temp file that is
//! then renamed over the original, so readers never see a half-written file.
//! Other processes writing the same file are not coordinated.

use std::fs;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use super::{Database, RecordStore};
use crate::error::StoreError;
use crate::models::{Course, Slot, SubmissionRecord};

/// A store backed by a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Opens a store at `path`. The file is read lazily on every access.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Writes `db` to `path` (creating parent directories) and opens it.
    pub fn create(path: impl Into<PathBuf>, db: &Database) -> Result<Self, StoreError> {
        let store = Self::open(path);
        store.save(db)?;
        Ok(store)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the full database from disk.
    pub fn load(&self) -> Result<Database, StoreError> {
        let file = fs::File::open(&self.path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => StoreError::NotFound {
                path: self.path.clone(),
            },
            _ => StoreError::Io(err),
        })?;
        let db: Database = serde_json::from_reader(BufReader::new(file)).inspect_err(|err| {
            warn!(path = %self.path.display(), error = %err, "record store is not valid JSON");
        })?;
        Ok(db)
    }

    fn save(&self, db: &Database) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(fs::File::create(&tmp_path)?);
            serde_json::to_writer_pretty(&mut writer, db)?;
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        Ok(self.load()?.courses)
    }

    fn list_slots(&self) -> Result<Vec<Slot>, StoreError> {
        Ok(self.load()?.slots)
    }

    fn list_submissions(&self) -> Result<Vec<SubmissionRecord>, StoreError> {
        Ok(self.load()?.submissions)
    }

    fn append_submission(&self, record: SubmissionRecord) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut db = self.load()?;
        db.submissions.push(record);
        self.save(&db)?;
        debug!(
            path = %self.path.display(),
            records = db.submissions.len(),
            "submission log rewritten"
        );
        Ok(())
    }
}
