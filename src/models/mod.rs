//! Shift-scheduling domain models.
//!
//! Immutable value types shared by the slot builder and the assignment
//! engine. Everything is constructed once at the ingestion boundary with
//! validated invariants (non-empty names, `start < end`) and never mutated
//! by the core.

mod interval;
mod participant;
mod schedule;
mod slot;

pub use interval::{DayRange, Interval};
pub use participant::{Coverage, Participant};
pub use schedule::{NoSolutionReason, ScheduleOutcome, ScheduleResult, ShiftAssignment};
pub use slot::TimeSlot;
