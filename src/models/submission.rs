//! Submission audit records.
//!
//! Every submission that passes lookup, verification and the capacity
//! check leaves exactly one [`SubmissionRecord`] in the audit log.
//! Records are append-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Final status of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmitStatus {
    /// Change applied immediately.
    Success,
    /// Change accepted and queued for manual review.
    PendingAudit,
    /// Change rejected.
    Failed,
}

impl SubmitStatus {
    /// Wire code of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::PendingAudit => "PENDING_AUDIT",
            Self::Failed => "FAILED",
        }
    }
}

/// Who asked for the change, in the addressing mode they used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requester {
    /// Keyed mode.
    CourseKey(String),
    /// Name mode.
    StudentName(String),
}

/// One audit log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Requester identity.
    #[serde(flatten)]
    pub requester: Requester,
    /// Chosen slot.
    pub slot_id: String,
    /// Recorded status.
    pub status: SubmitStatus,
    /// When the record was created.
    #[serde(deserialize_with = "audit_timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,
}

/// Lenient timestamp reader for audit records.
///
/// Accepts RFC 3339 and, for logs written without an offset, ISO 8601
/// local timestamps (`2025-03-01T10:00:00.123456`) read as UTC.
mod audit_timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn parse(text: &str) -> Option<DateTime<Utc>> {
        let text = text.trim();
        DateTime::parse_from_rfc3339(text)
            .map(|t| t.with_timezone(&Utc))
            .or_else(|_| NaiveDateTime::parse_from_str(text, NAIVE_FORMAT).map(|t| t.and_utc()))
            .ok()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).ok_or_else(|| serde::de::Error::custom(format!("invalid audit timestamp '{text}'")))
    }
}

impl SubmissionRecord {
    /// Creates a record stamped with the current time.
    pub fn new(requester: Requester, slot_id: impl Into<String>, status: SubmitStatus) -> Self {
        Self {
            requester,
            slot_id: slot_id.into(),
            status,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(SubmitStatus::PendingAudit.as_str(), "PENDING_AUDIT");
        assert_eq!(
            serde_json::to_string(&SubmitStatus::PendingAudit).unwrap(),
            r#""PENDING_AUDIT""#
        );
    }

    #[test]
    fn test_record_flattens_requester() {
        let record = SubmissionRecord::new(
            Requester::StudentName("Alice".into()),
            "S3",
            SubmitStatus::Success,
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["student_name"], "Alice");
        assert_eq!(json["slot_id"], "S3");
        assert_eq!(json["status"], "SUCCESS");

        let back: SubmissionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_record_without_offset() {
        let record: SubmissionRecord = serde_json::from_str(
            r#"{"student_name":"Alice","slot_id":"S3","status":"PENDING_AUDIT","timestamp":"2025-03-01T10:00:00.123456"}"#,
        )
        .unwrap();
        assert_eq!(record.requester, Requester::StudentName("Alice".into()));
        assert_eq!(record.timestamp.to_rfc3339(), "2025-03-01T10:00:00.123456+00:00");

        let seconds_only = audit_timestamp::parse("2025-03-01T10:00:00").unwrap();
        assert_eq!(seconds_only.to_rfc3339(), "2025-03-01T10:00:00+00:00");
    }

    #[test]
    fn test_record_with_offset() {
        let t = audit_timestamp::parse("2025-03-01T18:00:00+08:00").unwrap();
        assert_eq!(t.to_rfc3339(), "2025-03-01T10:00:00+00:00");
        assert!(audit_timestamp::parse("yesterday").is_none());
    }
}
