//! Shift assignment engine.
//!
//! Builds a constraint model over participants and slots, composes the
//! weighted objective, drives a [`CpSolver`] backend, and decodes the
//! result into a [`ScheduleResult`].
//!
//! # Model
//!
//! - `assign[i,j]` exists only when participant `i`'s normal or if-needed
//!   availability fully contains slot `j` — ineligible pairs have no
//!   variable, so they can never be proposed.
//! - `active[j]` marks whether slot `j` is staffed at all. An active slot
//!   carries between `min_required` and `num_required` people; an inactive
//!   slot carries none. A slot nobody can take is fixed inactive and
//!   silently dropped from the output.
//! - Per participant: total and per-day assigned minutes are capped.
//!
//! The whole build is purely functional over its inputs; independent runs
//! can proceed concurrently from independent call sites.

mod objective;

pub use objective::ObjectiveWeights;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::Duration;

use chrono::NaiveDate;
use log::{debug, info};

use crate::error::ModelError;
use crate::models::{
    Coverage, NoSolutionReason, Participant, ScheduleOutcome, ScheduleResult, ShiftAssignment,
    TimeSlot,
};
use crate::solver::ilp::IlpSolver;
use crate::solver::{
    default_workers, BoolVar, CmpOp, CpModel, CpSolution, CpSolver, LinearExpr, SolveStatus,
    SolverConfig,
};

/// Parameters of one assignment run.
///
/// Constructed once, validated once; the engine threads it through every
/// call instead of consulting any ambient configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignParams {
    /// Maximum occupancy of an active slot.
    pub num_required: u32,
    /// Minimum occupancy of an active slot.
    pub min_required: u32,
    /// Per-participant total hour cap.
    pub max_hours: f64,
    /// Per-participant daily hour cap.
    pub max_hours_per_day: f64,
    /// Wall-clock budget for the solver.
    pub time_limit: Duration,
    /// Parallel search workers inside the solver.
    pub num_workers: usize,
    /// Soft-term weights.
    pub weights: ObjectiveWeights,
}

impl AssignParams {
    /// Creates parameters with default budget and weights.
    ///
    /// Rejects `min_required > num_required` and negative hour caps;
    /// those are caller bugs, not scheduling outcomes.
    pub fn new(
        num_required: u32,
        min_required: u32,
        max_hours: f64,
        max_hours_per_day: f64,
    ) -> Result<Self, ModelError> {
        if min_required > num_required {
            return Err(ModelError::OccupancyBoundsInverted {
                min_required,
                num_required,
            });
        }
        if max_hours < 0.0 {
            return Err(ModelError::NegativeHourBudget(max_hours));
        }
        if max_hours_per_day < 0.0 {
            return Err(ModelError::NegativeHourBudget(max_hours_per_day));
        }
        Ok(Self {
            num_required,
            min_required,
            max_hours,
            max_hours_per_day,
            time_limit: Duration::from_secs(15),
            num_workers: default_workers(),
            weights: ObjectiveWeights::default(),
        })
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Sets the solver worker count (clamped to at least 1).
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers.max(1);
        self
    }

    /// Overrides the objective weights.
    pub fn with_weights(mut self, weights: ObjectiveWeights) -> Self {
        self.weights = weights;
        self
    }

    fn solver_config(&self) -> SolverConfig {
        SolverConfig::default()
            .with_time_limit(self.time_limit)
            .with_workers(self.num_workers)
    }
}

/// A fully built assignment model plus its decision-variable tables.
struct BuiltModel {
    model: CpModel,
    /// `(participant, slot) -> assign` for eligible pairs only.
    assign: HashMap<(usize, usize), BoolVar>,
    /// One activity variable per slot.
    active: Vec<BoolVar>,
}

/// Builds a CP model from participants and slots and drives a solver.
///
/// Mirrors the slot axis produced by [`crate::slots::build_day_slots`];
/// any value-deduplicated slot list works.
pub struct ShiftCpBuilder<'a> {
    participants: &'a [Participant],
    slots: &'a [TimeSlot],
    params: &'a AssignParams,
}

impl<'a> ShiftCpBuilder<'a> {
    /// Creates a builder over one run's inputs.
    pub fn new(
        participants: &'a [Participant],
        slots: &'a [TimeSlot],
        params: &'a AssignParams,
    ) -> Self {
        Self {
            participants,
            slots,
            params,
        }
    }

    /// Solves the assignment problem with the given backend.
    ///
    /// Empty input short-circuits to `NoSolution(EmptyInput)` without
    /// invoking the solver. Infeasibility and budget exhaustion are
    /// outcomes, never panics.
    pub fn solve<S: CpSolver>(&self, solver: &S) -> ScheduleOutcome {
        if self.participants.is_empty() || self.slots.is_empty() {
            info!("assignment skipped: empty roster or slot axis");
            return ScheduleOutcome::NoSolution(NoSolutionReason::EmptyInput);
        }

        let built = self.build();
        let solution = solver.solve(&built.model, &self.params.solver_config());

        match solution.status {
            SolveStatus::Optimal | SolveStatus::Feasible => self.decode(&built, &solution),
            SolveStatus::Infeasible => {
                ScheduleOutcome::NoSolution(NoSolutionReason::Infeasible)
            }
            SolveStatus::Unknown => ScheduleOutcome::NoSolution(NoSolutionReason::TimedOut),
        }
    }

    /// Builds variables, hard constraints, and the objective.
    fn build(&self) -> BuiltModel {
        let mut model = CpModel::new();
        let day_slots = self.slots_by_day();

        let active: Vec<BoolVar> = (0..self.slots.len())
            .map(|j| model.new_bool_var(format!("active_s{j}")))
            .collect();

        // Eligibility by construction: a variable exists only when the
        // participant's declared windows fully contain the slot.
        let mut assign = HashMap::new();
        let mut if_needed = HashSet::new();
        for (i, p) in self.participants.iter().enumerate() {
            for (j, slot) in self.slots.iter().enumerate() {
                match p.coverage(slot) {
                    Some(Coverage::Normal) => {
                        assign.insert((i, j), model.new_bool_var(format!("assign_p{i}_s{j}")));
                    }
                    Some(Coverage::IfNeeded) => {
                        assign.insert((i, j), model.new_bool_var(format!("assign_p{i}_s{j}")));
                        if_needed.insert((i, j));
                    }
                    None => {}
                }
            }
        }

        self.add_occupancy_constraints(&mut model, &assign, &active);
        self.add_hour_budgets(&mut model, &assign);

        let obj = objective::compose(
            &mut model,
            self.participants.len(),
            &day_slots,
            &assign,
            &active,
            &if_needed,
            &self.params.weights,
        );
        model.maximize(obj);

        debug!(
            "assignment model built: {} participants, {} slots, {} vars, {} constraints",
            self.participants.len(),
            self.slots.len(),
            model.var_count(),
            model.constraint_count(),
        );

        BuiltModel {
            model,
            assign,
            active,
        }
    }

    /// Occupancy bounds per slot, coupled to the activity variable.
    fn add_occupancy_constraints(
        &self,
        model: &mut CpModel,
        assign: &HashMap<(usize, usize), BoolVar>,
        active: &[BoolVar],
    ) {
        let min_required = i64::from(self.params.min_required);
        let num_required = i64::from(self.params.num_required);

        for (j, &active_j) in active.iter().enumerate() {
            let members: Vec<BoolVar> = (0..self.participants.len())
                .filter_map(|i| assign.get(&(i, j)).copied())
                .collect();

            if members.is_empty() {
                // Nobody can take this slot; drop it silently.
                model.fix_bool(active_j, false);
                continue;
            }

            // active => sum >= min_required, and sum <= num_required * active
            // (the upper side also forces an inactive slot to zero).
            let mut lower = LinearExpr::sum(members.iter().copied());
            lower.add_term(active_j, -min_required);
            model.add_linear(lower, CmpOp::Ge, 0);

            let mut upper = LinearExpr::sum(members.iter().copied());
            upper.add_term(active_j, -num_required);
            model.add_linear(upper, CmpOp::Le, 0);

            // Each member individually needs the slot to be active.
            for &a in &members {
                let mut link = LinearExpr::new();
                link.add_term(a, 1);
                link.add_term(active_j, -1);
                model.add_linear(link, CmpOp::Le, 0);
            }
        }
    }

    /// Total and per-day minute caps per participant.
    ///
    /// Uses each slot's true duration, so a clipped final slot counts
    /// its shorter length.
    fn add_hour_budgets(&self, model: &mut CpModel, assign: &HashMap<(usize, usize), BoolVar>) {
        let max_minutes = (self.params.max_hours * 60.0).round() as i64;
        let max_minutes_per_day = (self.params.max_hours_per_day * 60.0).round() as i64;

        for i in 0..self.participants.len() {
            let mut total = LinearExpr::new();
            let mut per_day: BTreeMap<NaiveDate, LinearExpr> = BTreeMap::new();
            let mut any = false;

            for (j, slot) in self.slots.iter().enumerate() {
                if let Some(&a) = assign.get(&(i, j)) {
                    let minutes = slot.duration_minutes();
                    total.add_term(a, minutes);
                    per_day.entry(slot.date()).or_default().add_term(a, minutes);
                    any = true;
                }
            }

            if any {
                model.add_linear(total, CmpOp::Le, max_minutes);
                for (_, expr) in per_day {
                    model.add_linear(expr, CmpOp::Le, max_minutes_per_day);
                }
            }
        }
    }

    /// Slot indices grouped by date, chronological within each day.
    fn slots_by_day(&self) -> Vec<(NaiveDate, Vec<usize>)> {
        let mut by_day: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
        for (j, slot) in self.slots.iter().enumerate() {
            by_day.entry(slot.date()).or_default().push(j);
        }
        for indices in by_day.values_mut() {
            indices.sort_by_key(|&j| self.slots[j].start);
        }
        by_day.into_iter().collect()
    }

    /// Extracts the schedule from a feasible solution.
    ///
    /// An optimum with zero staffed slots is reported as infeasible only
    /// when no slot has enough eligible participants. Otherwise staffing
    /// was possible but scored below zero (a heavily penalized fallback
    /// crew can do that), and the empty schedule is the genuine optimum.
    fn decode(&self, built: &BuiltModel, solution: &CpSolution) -> ScheduleOutcome {
        let mut order: Vec<usize> = (0..self.slots.len()).collect();
        order.sort_by_key(|&j| self.slots[j]);

        let mut assignments = Vec::new();
        let mut hours: BTreeMap<String, f64> = self
            .participants
            .iter()
            .map(|p| (p.name.clone(), 0.0))
            .collect();

        for j in order {
            if !solution.bool_value(built.active[j]) {
                continue;
            }
            let assignees: Vec<String> = self
                .participants
                .iter()
                .enumerate()
                .filter(|(i, _)| {
                    built
                        .assign
                        .get(&(*i, j))
                        .is_some_and(|&a| solution.bool_value(a))
                })
                .map(|(_, p)| p.name.clone())
                .collect();
            if assignees.is_empty() {
                continue;
            }

            let slot = self.slots[j];
            for name in &assignees {
                *hours.entry(name.clone()).or_default() += slot.duration_hours();
            }
            assignments.push(ShiftAssignment::new(slot, assignees));
        }

        if assignments.is_empty() {
            if self.any_staffable_slot(built) {
                info!("optimum staffs no slot; returning empty schedule");
                return ScheduleOutcome::Solved(ScheduleResult {
                    assignments,
                    hours,
                    objective_value: solution.objective_value,
                });
            }
            info!("no slot has enough eligible participants; reporting infeasible");
            return ScheduleOutcome::NoSolution(NoSolutionReason::Infeasible);
        }

        info!(
            "schedule found: {} staffed slots, objective {}",
            assignments.len(),
            solution.objective_value,
        );
        ScheduleOutcome::Solved(ScheduleResult {
            assignments,
            hours,
            objective_value: solution.objective_value,
        })
    }

    /// Whether any slot has at least `min_required` eligible participants.
    fn any_staffable_slot(&self, built: &BuiltModel) -> bool {
        let min = self.params.min_required as usize;
        (0..self.slots.len()).any(|j| {
            (0..self.participants.len())
                .filter(|&i| built.assign.contains_key(&(i, j)))
                .count()
                >= min
        })
    }
}

/// Assigns participants to slots and returns the filled schedule.
///
/// The public entry point of the engine: builds the model, solves it with
/// the shipped ILP backend within the configured budget, and decodes the
/// result. Returns `NoSolution` (with a distinguishable reason) for empty
/// input, proven infeasibility, or an exhausted budget — never an error.
pub fn assign_shifts(
    participants: &[Participant],
    slots: &[TimeSlot],
    params: &AssignParams,
) -> ScheduleOutcome {
    ShiftCpBuilder::new(participants, slots, params).solve(&IlpSolver::new())
}
