//! Error types for record storage and request input.
//!
//! Business-rule failures (slot full, verification mismatch, ...) are not
//! errors: they are returned as reason codes inside result values. Only
//! infrastructure failures and malformed input surface here.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a [`RecordStore`](crate::store::RecordStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file does not exist.
    #[error("record store not found at {}", .path.display())]
    NotFound { path: PathBuf },

    /// Reading or writing the backing file failed.
    #[error("record store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not valid store JSON.
    #[error("record store JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("record store lock poisoned")]
    Poisoned,
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Storage failed; fatal to the current call.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A time or date string could not be parsed.
    #[error("invalid time '{input}': expected 'YYYY-MM-DD HH:MM' or 'YYYY-MM-DD'")]
    InvalidTime { input: String },
}

impl ScheduleError {
    /// Returns true if this error came from the record store.
    pub fn is_store_error(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::NotFound {
            path: PathBuf::from("data/db.json"),
        };
        assert_eq!(err.to_string(), "record store not found at data/db.json");
    }

    #[test]
    fn test_schedule_error_from_store() {
        let err: ScheduleError = StoreError::Poisoned.into();
        assert!(err.is_store_error());
        assert_eq!(err.to_string(), "record store lock poisoned");
    }

    #[test]
    fn test_invalid_time_message() {
        let err = ScheduleError::InvalidTime {
            input: "tomorrow".into(),
        };
        assert!(!err.is_store_error());
        assert!(err.to_string().contains("'tomorrow'"));
    }
}
