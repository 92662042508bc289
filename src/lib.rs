//! Shift assignment engine for availability-poll rosters.
//!
//! Turns participants' availability windows into fixed-duration shift
//! slots and fills them by integer optimization: maximize coverage and
//! continuity while honoring occupancy bounds and per-person hour caps.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Participant`, `Interval`, `TimeSlot`,
//!   `DayRange`, `ScheduleResult`, `ScheduleOutcome`
//! - **`slots`**: Slot derivation — `build_day_slots`, `SlotPlan`
//! - **`engine`**: Model construction and solving — `assign_shifts`,
//!   `AssignParams`, `ShiftCpBuilder`, `ObjectiveWeights`
//! - **`solver`**: Backend-neutral constraint IR — `CpModel`, `CpSolver`,
//!   plus the shipped `IlpSolver`
//! - **`validation`**: Input integrity checks (duplicate names, duplicate
//!   slots, empty availability)
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use rota_core::{assign_shifts, build_day_slots, AssignParams, Interval, Participant};
//!
//! let day = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
//! let anna = Participant::new("Anna")?
//!     .with_availability(Interval::new(
//!         day.and_hms_opt(9, 0, 0).unwrap(),
//!         day.and_hms_opt(12, 0, 0).unwrap(),
//!     )?);
//!
//! let plan = build_day_slots(&[anna.clone()], &[day], 30, None)?;
//! let params = AssignParams::new(1, 1, 4.0, 4.0)?;
//! let outcome = assign_shifts(&[anna], &plan.all_slots, &params);
//!
//! if let Some(result) = outcome.schedule() {
//!     for a in &result.assignments {
//!         println!("{} - {}: {:?}", a.slot.start, a.slot.end, a.assignees);
//!     }
//! }
//! # Ok::<(), rota_core::ModelError>(())
//! ```

pub mod engine;
pub mod error;
pub mod models;
pub mod slots;
pub mod solver;
pub mod validation;

pub use engine::{assign_shifts, AssignParams, ObjectiveWeights, ShiftCpBuilder};
pub use error::ModelError;
pub use models::{
    Coverage, DayRange, Interval, NoSolutionReason, Participant, ScheduleOutcome, ScheduleResult,
    ShiftAssignment, TimeSlot,
};
pub use slots::{build_day_slots, SlotPlan};
pub use solver::ilp::IlpSolver;
pub use solver::{CpModel, CpSolver, SolveStatus, SolverConfig};
pub use validation::{validate_input, ValidationError, ValidationErrorKind, ValidationResult};
