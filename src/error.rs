//! Contract-violation errors.
//!
//! `ModelError` covers programming errors at the construction boundary:
//! inverted intervals, empty names, degenerate parameters. Expected
//! "no usable schedule" outcomes are values (`ScheduleOutcome::NoSolution`),
//! never errors — see `models::schedule`.

use chrono::NaiveDateTime;
use thiserror::Error;

/// A violated construction invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// An interval or day range with `start >= end`.
    #[error("interval start {start} is not before end {end}")]
    EmptyInterval {
        /// Offending start.
        start: NaiveDateTime,
        /// Offending end.
        end: NaiveDateTime,
    },

    /// A participant with an empty display name.
    #[error("participant name must not be empty")]
    EmptyName,

    /// A slot walk with a zero step would never terminate.
    #[error("shift duration must be at least one minute")]
    ZeroShiftDuration,

    /// Minimum occupancy above maximum occupancy.
    #[error("min_required ({min_required}) exceeds num_required ({num_required})")]
    OccupancyBoundsInverted {
        /// Requested minimum occupancy.
        min_required: u32,
        /// Requested maximum occupancy.
        num_required: u32,
    },

    /// A negative hour budget.
    #[error("hour budget must be non-negative, got {0}")]
    NegativeHourBudget(f64),
}
