//! Schedule (solution) model.
//!
//! A `ScheduleResult` is the output of one optimization run: the staffed
//! slots with their assignees plus per-participant hour totals. A run that
//! finds nothing usable yields `ScheduleOutcome::NoSolution` with a reason
//! the presentation layer can distinguish ("no data" vs. "infeasible" vs.
//! "timed out") — never an error.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::TimeSlot;

/// A staffed slot: the slot plus the names assigned to it.
///
/// Only slots with at least one assignee appear in a schedule. Assignees
/// follow roster order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    /// The staffed slot.
    pub slot: TimeSlot,
    /// Display names of everyone working this slot.
    pub assignees: Vec<String>,
}

impl ShiftAssignment {
    /// Creates a staffed slot.
    pub fn new(slot: TimeSlot, assignees: Vec<String>) -> Self {
        Self { slot, assignees }
    }

    /// Number of people on this slot.
    #[inline]
    pub fn assignee_count(&self) -> usize {
        self.assignees.len()
    }
}

/// A complete filled schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Staffed slots in chronological order.
    pub assignments: Vec<ShiftAssignment>,
    /// Total assigned hours per participant, 0.0 for the unassigned.
    pub hours: BTreeMap<String, f64>,
    /// Objective value of the returned solution.
    pub objective_value: i64,
}

impl ScheduleResult {
    /// Staffed slots on a given date.
    pub fn assignments_for_day(&self, date: NaiveDate) -> Vec<&ShiftAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.slot.date() == date)
            .collect()
    }

    /// Staffed slots that include a given participant.
    pub fn assignments_for(&self, name: &str) -> Vec<&ShiftAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.assignees.iter().any(|n| n == name))
            .collect()
    }

    /// Total hours for a participant (0.0 if unknown).
    pub fn hours_for(&self, name: &str) -> f64 {
        self.hours.get(name).copied().unwrap_or(0.0)
    }

    /// Number of staffed slots.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }
}

/// Why a run produced no schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoSolutionReason {
    /// Empty roster or empty slot axis; the solver was never invoked.
    EmptyInput,
    /// The solver proved no assignment satisfies the hard constraints.
    Infeasible,
    /// The time limit ran out before any feasible incumbent was found.
    TimedOut,
}

/// Outcome of one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScheduleOutcome {
    /// A schedule was found (optimal or best-effort within the budget).
    Solved(ScheduleResult),
    /// No usable schedule; a legitimate outcome, not a fault.
    NoSolution(NoSolutionReason),
}

impl ScheduleOutcome {
    /// Whether a schedule was produced.
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }

    /// The schedule, if one was produced.
    pub fn schedule(&self) -> Option<&ScheduleResult> {
        match self {
            Self::Solved(result) => Some(result),
            Self::NoSolution(_) => None,
        }
    }
}
