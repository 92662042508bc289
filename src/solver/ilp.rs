//! MILP backend over `good_lp`.
//!
//! Translates the [`CpModel`] IR into a `good_lp` problem (integer
//! variables with bounds, linear constraints, maximize) and maps the
//! resolution result onto [`SolveStatus`]. The crate is built with the
//! pure-Rust `microlp` solver, so `default_solver` resolves to it; any
//! other `good_lp` backend works the same way.

use good_lp::constraint::{eq, geq, leq};
use good_lp::{
    default_solver, variable, variables, Expression, ResolutionError, Solution, SolverModel,
    Variable,
};
use log::{debug, info};

use super::{CmpOp, CpModel, CpSolution, CpSolver, SolveStatus, SolverConfig};

/// ILP solver backed by `good_lp`'s default backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct IlpSolver;

impl IlpSolver {
    /// Creates the solver.
    pub fn new() -> Self {
        Self
    }
}

impl CpSolver for IlpSolver {
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> CpSolution {
        // microlp exposes neither a wall-clock limit nor worker threads;
        // the knobs are accepted for backend parity.
        debug!(
            "ilp solve: {} vars, {} constraints (time limit {:?} and {} workers not enforced by backend)",
            model.var_count(),
            model.constraint_count(),
            config.time_limit,
            config.num_workers,
        );

        let mut vars = variables!();
        let handles: Vec<Variable> = model
            .vars()
            .iter()
            .map(|v| {
                let def = if v.lb == 0 && v.ub == 1 {
                    variable().binary()
                } else {
                    variable().integer().min(v.lb as f64).max(v.ub as f64)
                };
                vars.add(def.name(v.name.as_str()))
            })
            .collect();

        let mut objective = Expression::from(0.0);
        for &(var, coeff) in model.objective().terms() {
            objective += coeff as f64 * handles[var.index()];
        }

        let mut problem = vars.maximise(objective).using(default_solver);
        for c in model.constraints() {
            let mut lhs = Expression::from(0.0);
            for &(var, coeff) in c.expr.terms() {
                lhs += coeff as f64 * handles[var.index()];
            }
            let rhs = c.rhs as f64;
            problem = problem.with(match c.op {
                CmpOp::Le => leq(lhs, rhs),
                CmpOp::Ge => geq(lhs, rhs),
                CmpOp::Eq => eq(lhs, rhs),
            });
        }

        match problem.solve() {
            Ok(solution) => {
                let values: Vec<i64> = handles
                    .iter()
                    .map(|&v| solution.value(v).round() as i64)
                    .collect();
                let objective_value = model.objective().eval(&values);
                info!("ilp solve finished: optimal, objective {objective_value}");
                CpSolution {
                    status: SolveStatus::Optimal,
                    values,
                    objective_value,
                }
            }
            Err(ResolutionError::Infeasible) => {
                info!("ilp solve finished: infeasible");
                CpSolution::empty(SolveStatus::Infeasible)
            }
            Err(err) => {
                info!("ilp solve finished without a solution: {err}");
                CpSolution::empty(SolveStatus::Unknown)
            }
        }
    }
}
