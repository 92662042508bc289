//! Objective composition.
//!
//! Derives the soft terms of the assignment model and combines them into
//! one weighted maximize expression:
//!
//! ```text
//!   sum(assign)
//! + coverage_reward     * sum(adjacent active slot pairs)
//! - gap_penalty         * sum(extra work blocks per person per day)
//! + day_coverage_reward * sum(days with any active slot)
//! - if_needed_penalty   * sum(fallback-only assignments)
//! ```
//!
//! Block-start, continuity, and day-covered booleans all go through the
//! shared AND/OR reification helpers on [`CpModel`].

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::solver::{BoolVar, CmpOp, CpModel, LinearExpr};

/// Weights of the soft objective terms.
///
/// All weights are tunable by the caller; `Default` matches the engine's
/// long-standing tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveWeights {
    /// Penalty per extra discontinuous work block (same person, same day).
    pub gap_penalty: i64,
    /// Reward per pair of chronologically adjacent active slots.
    pub coverage_reward: i64,
    /// Reward per day with at least one active slot.
    pub day_coverage_reward: i64,
    /// Penalty per assignment that relies on an if-needed window.
    pub if_needed_penalty: i64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            gap_penalty: 3,
            coverage_reward: 2,
            day_coverage_reward: 2,
            if_needed_penalty: 2,
        }
    }
}

/// Builds the weighted objective over an already-constrained model.
///
/// `day_slots` lists each day's slot indices in chronological order;
/// `assign` holds the eligibility-filtered decision variables and
/// `if_needed` flags the pairs covered only by fallback windows.
pub(crate) fn compose(
    model: &mut CpModel,
    participant_count: usize,
    day_slots: &[(NaiveDate, Vec<usize>)],
    assign: &HashMap<(usize, usize), BoolVar>,
    active: &[BoolVar],
    if_needed: &HashSet<(usize, usize)>,
    weights: &ObjectiveWeights,
) -> LinearExpr {
    let mut objective = LinearExpr::new();

    // Base coverage reward, discounted for fallback-only pairs.
    for (&(i, j), &var) in assign {
        objective.add_term(var, 1);
        if if_needed.contains(&(i, j)) {
            objective.add_term(var, -weights.if_needed_penalty);
        }
    }

    // Gap penalty: extra work blocks per participant per day.
    for i in 0..participant_count {
        for (date, slots) in day_slots {
            let starts = block_starts(model, i, slots, assign);
            if starts.len() > 1 {
                let extra = extra_blocks(model, i, *date, &starts);
                objective.add_term(extra, -weights.gap_penalty);
            }
        }
    }

    // Continuity reward: adjacent active slots within a day.
    for (_, slots) in day_slots {
        for pair in slots.windows(2) {
            let (j1, j2) = (pair[0], pair[1]);
            let cont = model.reify_and(
                &[active[j1].lit(), active[j2].lit()],
                format!("cont_s{j1}_s{j2}"),
            );
            objective.add_term(cont, weights.coverage_reward);
        }
    }

    // Day coverage reward: any active slot on the day.
    for (date, slots) in day_slots {
        if slots.is_empty() {
            continue;
        }
        let lits: Vec<_> = slots.iter().map(|&j| active[j].lit()).collect();
        let covered = model.reify_or(&lits, format!("day_covered_{date}"));
        objective.add_term(covered, weights.day_coverage_reward);
    }

    objective
}

/// One block-start boolean per assignable slot of participant `i` on a day.
///
/// A block starts at slot `j` iff `assign[i,j]` is set and the previous
/// slot of the day either has no variable for `i` or is unassigned.
fn block_starts(
    model: &mut CpModel,
    i: usize,
    slots: &[usize],
    assign: &HashMap<(usize, usize), BoolVar>,
) -> Vec<BoolVar> {
    let mut starts = Vec::new();
    let mut prev: Option<BoolVar> = None;

    for &j in slots {
        match assign.get(&(i, j)) {
            Some(&a) => {
                let lits = match prev {
                    Some(p) => vec![a.lit(), p.negated()],
                    None => vec![a.lit()],
                };
                starts.push(model.reify_and(&lits, format!("start_p{i}_s{j}")));
                prev = Some(a);
            }
            None => prev = None,
        }
    }
    starts
}

/// `extra = max(block_count - 1, 0)` for one participant-day.
///
/// `extra <= block_count` and `extra >= block_count - 1` pin the value
/// under maximization with a negative coefficient.
fn extra_blocks(
    model: &mut CpModel,
    i: usize,
    date: NaiveDate,
    starts: &[BoolVar],
) -> crate::solver::IntVar {
    let n = starts.len() as i64;
    let block_count = model.new_int_var(0, n, format!("block_count_p{i}_{date}"));
    let mut eq = LinearExpr::new();
    eq.add_term(block_count, 1);
    for &s in starts {
        eq.add_term(s, -1);
    }
    model.add_linear(eq, CmpOp::Eq, 0);

    let extra = model.new_int_var(0, n, format!("extra_blocks_p{i}_{date}"));
    let mut lower = LinearExpr::new();
    lower.add_term(extra, 1);
    lower.add_term(block_count, -1);
    model.add_linear(lower, CmpOp::Ge, -1);
    let mut upper = LinearExpr::new();
    upper.add_term(extra, 1);
    upper.add_term(block_count, -1);
    model.add_linear(upper, CmpOp::Le, 0);

    extra
}
