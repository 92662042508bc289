//! Candidate shift slots.
//!
//! A `TimeSlot` is a fixed-duration window carved out of a day's working
//! hours. All slots of a day share the configured duration except possibly
//! the last one, which is clipped to the day's upper bound.
//!
//! Slots are plain values: `Eq`/`Ord`/`Hash` derive from (start, end) so
//! the slot axis deduplicates across days by value.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A candidate shift window [start, end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Slot start (inclusive).
    pub start: NaiveDateTime,
    /// Slot end (exclusive).
    pub end: NaiveDateTime,
}

impl TimeSlot {
    /// Creates a slot, rejecting `start >= end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, ModelError> {
        if start >= end {
            return Err(ModelError::EmptyInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Calendar date this slot belongs to.
    ///
    /// Daily hour caps and gap penalties group slots by this date.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Slot length in whole minutes.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Slot length in fractional hours.
    #[inline]
    pub fn duration_hours(&self) -> f64 {
        self.duration_minutes() as f64 / 60.0
    }
}
