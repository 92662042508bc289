//! Backend-independent constraint model.
//!
//! The assignment engine expresses its problem against a small
//! "boolean/integer variable + linear constraint + maximize" vocabulary.
//! Any CP or MILP backend can solve it by implementing [`CpSolver`];
//! the shipped backend is [`ilp::IlpSolver`].
//!
//! AND/OR reification (block starts, continuity, day coverage) is
//! factored into [`CpModel::reify_and`] / [`CpModel::reify_or`] so every
//! call site shares one encoding:
//! `c <= l_k`, `c >= sum(l_k) - (n-1)` for AND, and the dual for OR.

pub mod ilp;

use std::time::Duration;

/// Index of a variable inside a [`CpModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(usize);

impl VarId {
    /// Position in the model's variable table.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A 0/1 decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoolVar(VarId);

impl BoolVar {
    /// The positive literal of this variable.
    #[inline]
    pub fn lit(self) -> BoolLit {
        BoolLit {
            var: self,
            negated: false,
        }
    }

    /// The negated literal of this variable.
    #[inline]
    pub fn negated(self) -> BoolLit {
        BoolLit {
            var: self,
            negated: true,
        }
    }
}

/// A bounded integer decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntVar(VarId);

impl From<BoolVar> for VarId {
    fn from(v: BoolVar) -> Self {
        v.0
    }
}

impl From<IntVar> for VarId {
    fn from(v: IntVar) -> Self {
        v.0
    }
}

/// A possibly-negated boolean variable.
///
/// The value of a negated literal is `1 - v`, which stays linear, so the
/// reification helpers accept either polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolLit {
    var: BoolVar,
    negated: bool,
}

/// Bounds and diagnostic name of one variable.
#[derive(Debug, Clone)]
pub struct VarInfo {
    /// Lower bound (inclusive).
    pub lb: i64,
    /// Upper bound (inclusive).
    pub ub: i64,
    /// Diagnostic name.
    pub name: String,
}

/// A linear combination of variables plus a constant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarId, i64)>,
    constant: i64,
}

impl LinearExpr {
    /// The empty expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `coeff * var`.
    pub fn add_term(&mut self, var: impl Into<VarId>, coeff: i64) {
        self.terms.push((var.into(), coeff));
    }

    /// Adds `coeff * lit`, folding the negation into the constant.
    pub fn add_lit(&mut self, lit: BoolLit, coeff: i64) {
        if lit.negated {
            self.constant += coeff;
            self.terms.push((lit.var.into(), -coeff));
        } else {
            self.terms.push((lit.var.into(), coeff));
        }
    }

    /// Adds a constant.
    pub fn add_constant(&mut self, value: i64) {
        self.constant += value;
    }

    /// Sum of boolean variables, each with coefficient 1.
    pub fn sum(vars: impl IntoIterator<Item = BoolVar>) -> Self {
        let mut expr = Self::new();
        for v in vars {
            expr.add_term(v, 1);
        }
        expr
    }

    /// Variable terms.
    pub fn terms(&self) -> &[(VarId, i64)] {
        &self.terms
    }

    /// Constant offset.
    pub fn constant(&self) -> i64 {
        self.constant
    }

    /// Evaluates the expression against a full variable valuation.
    pub fn eval(&self, values: &[i64]) -> i64 {
        self.constant
            + self
                .terms
                .iter()
                .map(|&(v, c)| c * values[v.index()])
                .sum::<i64>()
    }
}

/// Comparison operator of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    /// `expr <= rhs`
    Le,
    /// `expr >= rhs`
    Ge,
    /// `expr == rhs`
    Eq,
}

/// `expr op rhs` with the constant already normalized into `rhs`.
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    /// Left-hand side; its constant is zero after normalization.
    pub expr: LinearExpr,
    /// Comparison operator.
    pub op: CmpOp,
    /// Right-hand side.
    pub rhs: i64,
}

/// A constraint model over boolean and integer variables.
#[derive(Debug, Clone, Default)]
pub struct CpModel {
    vars: Vec<VarInfo>,
    constraints: Vec<LinearConstraint>,
    objective: LinearExpr,
}

impl CpModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a 0/1 variable.
    pub fn new_bool_var(&mut self, name: impl Into<String>) -> BoolVar {
        BoolVar(self.push_var(0, 1, name))
    }

    /// Creates an integer variable with inclusive bounds.
    pub fn new_int_var(&mut self, lb: i64, ub: i64, name: impl Into<String>) -> IntVar {
        IntVar(self.push_var(lb, ub, name))
    }

    fn push_var(&mut self, lb: i64, ub: i64, name: impl Into<String>) -> VarId {
        let id = VarId(self.vars.len());
        self.vars.push(VarInfo {
            lb,
            ub,
            name: name.into(),
        });
        id
    }

    /// Adds `expr op rhs`, folding the expression constant into `rhs`.
    pub fn add_linear(&mut self, expr: LinearExpr, op: CmpOp, rhs: i64) {
        let mut expr = expr;
        let rhs = rhs - expr.constant;
        expr.constant = 0;
        self.constraints.push(LinearConstraint { expr, op, rhs });
    }

    /// Fixes a boolean variable to a value.
    pub fn fix_bool(&mut self, var: BoolVar, value: bool) {
        let mut expr = LinearExpr::new();
        expr.add_term(var, 1);
        self.add_linear(expr, CmpOp::Eq, i64::from(value));
    }

    /// Creates `c` true iff every literal is true (AND reification).
    pub fn reify_and(&mut self, lits: &[BoolLit], name: impl Into<String>) -> BoolVar {
        let c = self.new_bool_var(name);
        // c <= l_k for each literal
        for &lit in lits {
            let mut expr = LinearExpr::new();
            expr.add_term(c, 1);
            expr.add_lit(lit, -1);
            self.add_linear(expr, CmpOp::Le, 0);
        }
        // c >= sum(l_k) - (n - 1)
        let mut expr = LinearExpr::new();
        expr.add_term(c, 1);
        for &lit in lits {
            expr.add_lit(lit, -1);
        }
        self.add_linear(expr, CmpOp::Ge, 1 - lits.len() as i64);
        c
    }

    /// Creates `c` true iff at least one literal is true (OR reification).
    pub fn reify_or(&mut self, lits: &[BoolLit], name: impl Into<String>) -> BoolVar {
        let c = self.new_bool_var(name);
        // c >= l_k for each literal
        for &lit in lits {
            let mut expr = LinearExpr::new();
            expr.add_term(c, 1);
            expr.add_lit(lit, -1);
            self.add_linear(expr, CmpOp::Ge, 0);
        }
        // c <= sum(l_k)
        let mut expr = LinearExpr::new();
        expr.add_term(c, 1);
        for &lit in lits {
            expr.add_lit(lit, -1);
        }
        self.add_linear(expr, CmpOp::Le, 0);
        c
    }

    /// Sets the (maximized) objective.
    pub fn maximize(&mut self, expr: LinearExpr) {
        self.objective = expr;
    }

    /// Variable table.
    pub fn vars(&self) -> &[VarInfo] {
        &self.vars
    }

    /// All constraints.
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// The objective expression.
    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// Number of variables.
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}

/// Search budget for one solve call.
///
/// Backends without native support for a knob accept and ignore it;
/// neither knob affects correctness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Wall-clock budget for the solve.
    pub time_limit: Duration,
    /// Parallel search workers inside the backend.
    pub num_workers: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(15),
            num_workers: default_workers(),
        }
    }
}

impl SolverConfig {
    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Sets the worker count (clamped to at least 1).
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers.max(1);
        self
    }
}

/// 60% of available cores, at least one.
pub fn default_workers() -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (cores * 6 / 10).max(1)
}

/// Terminal solver status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Proven optimal solution.
    Optimal,
    /// Feasible incumbent, optimality not proven (budget ran out).
    Feasible,
    /// Proven that no assignment satisfies the constraints.
    Infeasible,
    /// Nothing proven within the budget.
    Unknown,
}

/// Result of one solve call.
#[derive(Debug, Clone)]
pub struct CpSolution {
    /// Terminal status.
    pub status: SolveStatus,
    /// One value per model variable; empty unless a solution was found.
    pub values: Vec<i64>,
    /// Objective value of the returned solution.
    pub objective_value: i64,
}

impl CpSolution {
    /// A solution-less outcome.
    pub fn empty(status: SolveStatus) -> Self {
        Self {
            status,
            values: Vec::new(),
            objective_value: 0,
        }
    }

    /// Whether an assignment (optimal or feasible) is available.
    pub fn is_solution_found(&self) -> bool {
        matches!(self.status, SolveStatus::Optimal | SolveStatus::Feasible)
    }

    /// Value of a variable in the returned assignment.
    pub fn value(&self, var: impl Into<VarId>) -> i64 {
        self.values[var.into().index()]
    }

    /// Whether a boolean variable is set.
    pub fn bool_value(&self, var: BoolVar) -> bool {
        self.value(var) == 1
    }
}

/// A constraint/ILP backend.
///
/// One solve attempt per call; no retries, no shared state. The engine
/// never interprets anything beyond [`CpSolution`].
pub trait CpSolver {
    /// Solves the model in maximize mode within the configured budget.
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> CpSolution;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_creation_and_counts() {
        let mut m = CpModel::new();
        let a = m.new_bool_var("a");
        let x = m.new_int_var(0, 5, "x");
        assert_eq!(m.var_count(), 2);
        assert_eq!(m.vars()[VarId::from(a).index()].ub, 1);
        assert_eq!(m.vars()[VarId::from(x).index()].ub, 5);
    }

    #[test]
    fn test_add_linear_normalizes_constant() {
        let mut m = CpModel::new();
        let a = m.new_bool_var("a");
        let mut expr = LinearExpr::new();
        expr.add_term(a, 2);
        expr.add_constant(3);
        m.add_linear(expr, CmpOp::Le, 10);

        let c = &m.constraints()[0];
        assert_eq!(c.rhs, 7);
        assert_eq!(c.expr.constant(), 0);
    }

    #[test]
    fn test_negated_literal_folds_into_constant() {
        let mut m = CpModel::new();
        let a = m.new_bool_var("a");
        let mut expr = LinearExpr::new();
        expr.add_lit(a.negated(), 1);
        // value of !a is 1 - a
        assert_eq!(expr.constant(), 1);
        assert_eq!(expr.terms()[0].1, -1);
    }

    #[test]
    fn test_reify_and_constraint_count() {
        let mut m = CpModel::new();
        let a = m.new_bool_var("a");
        let b = m.new_bool_var("b");
        let _c = m.reify_and(&[a.lit(), b.lit()], "c");
        // one <= per literal plus the lower bound
        assert_eq!(m.constraint_count(), 3);
        assert_eq!(m.var_count(), 3);
    }

    #[test]
    fn test_reify_or_constraint_count() {
        let mut m = CpModel::new();
        let lits: Vec<BoolLit> = (0..4).map(|i| m.new_bool_var(format!("a{i}")).lit()).collect();
        let _c = m.reify_or(&lits, "c");
        assert_eq!(m.constraint_count(), 5);
    }

    #[test]
    fn test_expr_eval() {
        let mut m = CpModel::new();
        let a = m.new_bool_var("a");
        let x = m.new_int_var(0, 10, "x");
        let mut expr = LinearExpr::new();
        expr.add_term(a, 2);
        expr.add_term(x, -1);
        expr.add_constant(4);
        assert_eq!(expr.eval(&[1, 3]), 3);
    }

    #[test]
    fn test_solver_config_builders() {
        let cfg = SolverConfig::default()
            .with_time_limit(Duration::from_secs(2))
            .with_workers(0);
        assert_eq!(cfg.time_limit, Duration::from_secs(2));
        assert_eq!(cfg.num_workers, 1);
        assert!(default_workers() >= 1);
    }

    #[test]
    fn test_solution_accessors() {
        let mut m = CpModel::new();
        let a = m.new_bool_var("a");
        let sol = CpSolution {
            status: SolveStatus::Optimal,
            values: vec![1],
            objective_value: 5,
        };
        assert!(sol.is_solution_found());
        assert!(sol.bool_value(a));

        let none = CpSolution::empty(SolveStatus::Infeasible);
        assert!(!none.is_solution_found());
    }
}
