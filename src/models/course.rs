//! Course model.
//!
//! A course is one student's enrolment in a recurring class: who teaches
//! it, what is taught, and the secret used to verify keyed submissions.

use serde::{Deserialize, Serialize};

/// A student's course enrolment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course key.
    pub course_key: String,
    /// Enrolled student (name-mode addressing).
    #[serde(default)]
    pub student_name: String,
    /// Assigned teacher.
    pub teacher: String,
    /// Content/subject label, shared with the slots that teach it.
    pub content: String,
    /// Verification secret (last 4 digits of the phone number).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_last4: Option<String>,
}

impl Course {
    /// Creates a course with the given key.
    pub fn new(course_key: impl Into<String>) -> Self {
        Self {
            course_key: course_key.into(),
            student_name: String::new(),
            teacher: String::new(),
            content: String::new(),
            phone_last4: None,
        }
    }

    /// Sets the student name.
    pub fn with_student(mut self, student_name: impl Into<String>) -> Self {
        self.student_name = student_name.into();
        self
    }

    /// Sets the teacher.
    pub fn with_teacher(mut self, teacher: impl Into<String>) -> Self {
        self.teacher = teacher.into();
        self
    }

    /// Sets the content label.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Sets the verification secret.
    pub fn with_phone_last4(mut self, digits: impl Into<String>) -> Self {
        self.phone_last4 = Some(digits.into());
        self
    }

    /// Checks a verification token against the stored secret.
    ///
    /// Exact, case-sensitive comparison. A course without a stored
    /// secret never verifies.
    pub fn verify(&self, token: &str) -> bool {
        self.phone_last4.as_deref() == Some(token)
    }
}
