//! Availability intervals and day-range overrides.
//!
//! An `Interval` is a half-open window [start, end) in local naive time.
//! The ingestion layer converts third-party payloads to local time before
//! the core sees them, so no offsets or time zones appear here.
//!
//! Invariant: `start < end`, enforced at construction.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A half-open time window [start, end) during which someone can work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// Window start (inclusive).
    pub start: NaiveDateTime,
    /// Window end (exclusive).
    pub end: NaiveDateTime,
}

impl Interval {
    /// Creates an interval, rejecting `start >= end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, ModelError> {
        if start >= end {
            return Err(ModelError::EmptyInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Calendar date of the interval start.
    ///
    /// Day-window derivation groups intervals by this date.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Whether this interval fully contains [start, end).
    #[inline]
    pub fn contains_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start >= self.start && end <= self.end
    }

    /// Interval length in whole minutes.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// An explicit per-date working window.
///
/// When supplied, it overrides the day bounds that would otherwise be
/// derived from participant availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    /// Working-day start.
    pub start: NaiveDateTime,
    /// Working-day end.
    pub end: NaiveDateTime,
}

impl DayRange {
    /// Creates a day range, rejecting `start >= end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, ModelError> {
        if start >= end {
            return Err(ModelError::EmptyInterval { start, end });
        }
        Ok(Self { start, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_interval_rejects_inverted() {
        assert!(Interval::new(dt(1, 10, 0), dt(1, 9, 0)).is_err());
        assert!(Interval::new(dt(1, 10, 0), dt(1, 10, 0)).is_err());
        assert!(Interval::new(dt(1, 9, 0), dt(1, 10, 0)).is_ok());
    }

    #[test]
    fn test_contains_range_half_open() {
        let iv = Interval::new(dt(1, 9, 0), dt(1, 11, 0)).unwrap();
        assert!(iv.contains_range(dt(1, 9, 0), dt(1, 11, 0)));
        assert!(iv.contains_range(dt(1, 9, 30), dt(1, 10, 0)));
        assert!(!iv.contains_range(dt(1, 8, 30), dt(1, 9, 30)));
        assert!(!iv.contains_range(dt(1, 10, 30), dt(1, 11, 30)));
    }

    #[test]
    fn test_interval_date_and_duration() {
        let iv = Interval::new(dt(2, 9, 15), dt(2, 10, 0)).unwrap();
        assert_eq!(iv.date(), NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        assert_eq!(iv.duration_minutes(), 45);
    }

    #[test]
    fn test_day_range_rejects_inverted() {
        assert!(DayRange::new(dt(1, 17, 0), dt(1, 9, 0)).is_err());
        assert!(DayRange::new(dt(1, 9, 0), dt(1, 17, 0)).is_ok());
    }
}
