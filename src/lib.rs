//! Class rescheduling core.
//!
//! Matches a request to move a class against the bookable slots, proposes
//! ranked alternatives when the requested slot is unavailable, and records
//! reschedule submissions in an append-only audit log.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `Slot`, `SlotTarget`, `SubmissionRecord`
//! - **`store`**: Record store trait with in-memory and JSON file backends
//! - **`matching`**: Availability check and alternative ranking
//! - **`submission`**: Keyed/named submissions with verification and auditing
//! - **`service`**: Transport-agnostic entry points over a store
//! - **`validation`**: Record integrity checks (duplicate IDs, overbooking)
//! - **`config`**: Process configuration read once at startup
//!
//! # Errors
//!
//! Business outcomes (slot full, verification mismatch, ...) are values
//! with reason codes. Only storage failures and malformed input are `Err`.
//!
//! # Logging
//!
//! Emits `tracing` events; installing a subscriber is up to the host.

pub mod config;
pub mod error;
pub mod matching;
pub mod models;
pub mod service;
pub mod store;
pub mod submission;
pub mod validation;

pub use config::ServiceConfig;
pub use error::{ScheduleError, StoreError};
pub use service::{CourseRef, QueryRequest, QueryResponse, ScheduleService};
