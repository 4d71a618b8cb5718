//! Slot model.
//!
//! A slot is one bookable class session: a time, a teacher, a content
//! label, a location and a seat count.
//!
//! # Availability
//! `capacity_left = capacity - booked`. A slot is bookable iff
//! `capacity_left > 0`. Every report of remaining seats goes through
//! [`Slot::capacity_left`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::time::slot_time;

/// A bookable class session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Unique slot identifier.
    pub slot_id: String,
    /// Session start (minute precision).
    #[serde(with = "slot_time")]
    pub time: NaiveDateTime,
    /// Teacher running the session.
    pub teacher: String,
    /// Content/subject label.
    pub content: String,
    /// Room or venue.
    #[serde(default)]
    pub location: String,
    /// Total seats.
    #[serde(default)]
    pub capacity: u32,
    /// Seats already taken. Expected to satisfy `booked <= capacity`.
    #[serde(default)]
    pub booked: u32,
}

impl Slot {
    /// Creates an empty slot (no seats) at the given time.
    pub fn new(slot_id: impl Into<String>, time: NaiveDateTime) -> Self {
        Self {
            slot_id: slot_id.into(),
            time,
            teacher: String::new(),
            content: String::new(),
            location: String::new(),
            capacity: 0,
            booked: 0,
        }
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

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets total and booked seats.
    pub fn with_seats(mut self, capacity: u32, booked: u32) -> Self {
        self.capacity = capacity;
        self.booked = booked;
        self
    }

    /// Remaining seats. Negative only if the data violates `booked <= capacity`.
    #[inline]
    pub fn capacity_left(&self) -> i64 {
        i64::from(self.capacity) - i64::from(self.booked)
    }

    /// Whether at least one seat is free.
    #[inline]
    pub fn is_bookable(&self) -> bool {
        self.capacity_left() > 0
    }
}
