//! Rescheduling domain models.
//!
//! | Type | Role |
//! |------|------|
//! | `Course` | A student's enrolment: teacher, content, verification secret |
//! | `Slot` | A bookable session with seats |
//! | `SlotTarget` | The time a request asks for (exact or whole day) |
//! | `SubmissionRecord` | Audit log entry |

mod course;
mod slot;
mod submission;
mod time;

pub use course::Course;
pub use slot::Slot;
pub use submission::{Requester, SubmissionRecord, SubmitStatus};
pub use time::{parse_date, parse_slot_time, slot_time, SlotTarget, DATE_FORMAT, SLOT_TIME_FORMAT};
