//! Process configuration.
//!
//! Read once at startup and injected into the service; nothing in the
//! crate reads the environment per request.

use std::path::PathBuf;

use crate::submission::SubmissionConfig;

/// Environment variable enabling direct success (`"true"`, any case).
pub const DIRECT_SUCCESS_ENV: &str = "SCHEDULE_DIRECT_SUCCESS";

/// Environment variable holding the record store path.
pub const DB_PATH_ENV: &str = "SCHEDULE_DB_PATH";

/// Default record store path.
pub const DEFAULT_DB_PATH: &str = "data/db.json";

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Accepted submissions finish as `SUCCESS` instead of `PENDING_AUDIT`.
    pub direct_success: bool,
    /// JSON record store location.
    pub db_path: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            direct_success: false,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

impl ServiceConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let direct_success = lookup(DIRECT_SUCCESS_ENV)
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let db_path = lookup(DB_PATH_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        Self {
            direct_success,
            db_path,
        }
    }

    /// Sets direct success.
    pub fn with_direct_success(mut self, direct_success: bool) -> Self {
        self.direct_success = direct_success;
        self
    }

    /// Sets the record store path.
    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }

    /// Submission handler configuration.
    pub fn submission(&self) -> SubmissionConfig {
        SubmissionConfig {
            direct_success: self.direct_success,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ServiceConfig::default());
        assert!(!config.submission().direct_success);
    }

    #[test]
    fn test_direct_success_parsing() {
        for (value, expected) in [("true", true), ("TRUE", true), (" True ", true), ("1", false), ("false", false)] {
            let config = ServiceConfig::from_lookup(lookup(&[(DIRECT_SUCCESS_ENV, value)]));
            assert_eq!(config.direct_success, expected, "value {value:?}");
        }
    }

    #[test]
    fn test_db_path() {
        let config = ServiceConfig::from_lookup(lookup(&[(DB_PATH_ENV, "/srv/school/db.json")]));
        assert_eq!(config.db_path, PathBuf::from("/srv/school/db.json"));

        let blank = ServiceConfig::from_lookup(lookup(&[(DB_PATH_ENV, "  ")]));
        assert_eq!(blank.db_path, PathBuf::from(DEFAULT_DB_PATH));
    }

    #[test]
    fn test_builder() {
        let config = ServiceConfig::default()
            .with_direct_success(true)
            .with_db_path("db.json");
        assert!(config.submission().direct_success);
        assert_eq!(config.db_path, PathBuf::from("db.json"));
    }
}
