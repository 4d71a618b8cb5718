//! Slot time representation and request targets.
//!
//! Slot times are wall-clock timestamps with minute precision, stored as
//! text in the `YYYY-MM-DD HH:MM` format so that lexical order equals
//! chronological order. No timezone is attached; all slots share the
//! timezone of the school that owns the data.
//!
//! # Precision
//! A request can target either an exact timestamp or a whole day. The two
//! are distinct [`SlotTarget`] variants and are never compared with each
//! other's precision.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Text format of a slot timestamp.
pub const SLOT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Text format of a calendar date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a slot timestamp (`YYYY-MM-DD HH:MM`).
pub fn parse_slot_time(text: &str) -> Result<NaiveDateTime, ScheduleError> {
    NaiveDateTime::parse_from_str(text.trim(), SLOT_TIME_FORMAT).map_err(|_| {
        ScheduleError::InvalidTime {
            input: text.to_string(),
        }
    })
}

/// Parses a calendar date (`YYYY-MM-DD`).
pub fn parse_date(text: &str) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| ScheduleError::InvalidTime {
        input: text.to_string(),
    })
}

/// Serde adapter for slot timestamps in `YYYY-MM-DD HH:MM` form.
pub mod slot_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::SLOT_TIME_FORMAT;

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(SLOT_TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(text.trim(), SLOT_TIME_FORMAT)
            .map_err(serde::de::Error::custom)
    }
}

/// The time a reschedule request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SlotTarget {
    /// Exact timestamp match.
    At(#[serde(with = "slot_time")] NaiveDateTime),
    /// Any slot on the given day (date-prefix match).
    OnDate(NaiveDate),
}

impl SlotTarget {
    /// Parses either a timestamp (`YYYY-MM-DD HH:MM`) or a date
    /// (`YYYY-MM-DD`). The variant follows the format that parses.
    pub fn parse(text: &str) -> Result<Self, ScheduleError> {
        if let Ok(time) = parse_slot_time(text) {
            return Ok(Self::At(time));
        }
        parse_date(text).map(Self::OnDate)
    }

    /// Whether a slot at `time` is at this target.
    pub fn matches(&self, time: NaiveDateTime) -> bool {
        match self {
            Self::At(at) => time == *at,
            Self::OnDate(date) => time.date() == *date,
        }
    }

    /// Absolute distance from this target, in the target's own unit:
    /// minutes for [`SlotTarget::At`], whole days for [`SlotTarget::OnDate`].
    pub fn distance(&self, time: NaiveDateTime) -> i64 {
        match self {
            Self::At(at) => (time - *at).num_minutes().abs(),
            Self::OnDate(date) => (time.date() - *date).num_days().abs(),
        }
    }

    /// The calendar day of this target.
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::At(at) => at.date(),
            Self::OnDate(date) => *date,
        }
    }
}

impl fmt::Display for SlotTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(at) => write!(f, "{}", at.format(SLOT_TIME_FORMAT)),
            Self::OnDate(date) => write!(f, "{}", date.format(DATE_FORMAT)),
        }
    }
}
