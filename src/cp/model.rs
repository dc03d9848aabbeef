//! Solver-neutral constraint model.
//!
//! A [`CpModel`] is the explicit builder context of one scheduling run:
//! it accumulates variables, constraints and the objective, and is then
//! handed by reference to a [`CpSolver`](super::CpSolver). Nothing is
//! shared between runs.
//!
//! # Constraint vocabulary
//! - linear `=`, `≤`, `≥` over integer expressions
//! - implication between two boolean literals
//! - max-equality: an integer variable equals the maximum of expressions
//!
//! This is the common subset of CP-SAT style solvers and MILP solvers
//! (where implications and max-equalities are linearized by the adapter).

use super::expr::{BoolVar, Comparison, IntVar, LinearExpr, Literal, VarId};

/// Domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// 0 or 1.
    Bool,
    /// Any integer in `[min, max]`.
    Int { min: i64, max: i64 },
}

impl Domain {
    /// Inclusive bounds of the domain.
    pub fn bounds(&self) -> (i64, i64) {
        match *self {
            Domain::Bool => (0, 1),
            Domain::Int { min, max } => (min, max),
        }
    }

    /// Whether `value` lies in the domain.
    pub fn contains(&self, value: i64) -> bool {
        let (lo, hi) = self.bounds();
        lo <= value && value <= hi
    }
}

/// Name and domain of a declared variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarInfo {
    pub name: String,
    pub domain: Domain,
}

/// A model constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CpConstraint {
    /// `expr ⋈ rhs`.
    Linear {
        expr: LinearExpr,
        cmp: Comparison,
        rhs: i64,
    },
    /// `antecedent ⇒ consequent`.
    Implication {
        antecedent: Literal,
        consequent: Literal,
    },
    /// `target = max(exprs)`.
    MaxEquality {
        target: IntVar,
        exprs: Vec<LinearExpr>,
    },
}

impl CpConstraint {
    /// Whether the constraint holds under a full assignment.
    pub fn is_satisfied(&self, value_of: impl Fn(VarId) -> i64) -> bool {
        match self {
            CpConstraint::Linear { expr, cmp, rhs } => cmp.holds(expr.evaluate(&value_of), *rhs),
            CpConstraint::Implication {
                antecedent,
                consequent,
            } => {
                let a = antecedent.holds(value_of(antecedent.var.id()) != 0);
                let c = consequent.holds(value_of(consequent.var.id()) != 0);
                !a || c
            }
            CpConstraint::MaxEquality { target, exprs } => exprs
                .iter()
                .map(|e| e.evaluate(&value_of))
                .max()
                .is_some_and(|m| m == value_of(target.id())),
        }
    }
}

/// A constraint model under construction.
#[derive(Debug, Clone)]
pub struct CpModel {
    name: String,
    vars: Vec<VarInfo>,
    constraints: Vec<CpConstraint>,
    objective: LinearExpr,
}

impl CpModel {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vars: Vec::new(),
            constraints: Vec::new(),
            objective: LinearExpr::new(),
        }
    }

    /// Model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn push_var(&mut self, name: String, domain: Domain) -> VarId {
        let id = VarId(self.vars.len());
        self.vars.push(VarInfo { name, domain });
        id
    }

    /// Declares a boolean variable.
    pub fn new_bool_var(&mut self, name: impl Into<String>) -> BoolVar {
        BoolVar(self.push_var(name.into(), Domain::Bool))
    }

    /// Declares an integer variable with inclusive bounds.
    ///
    /// An empty range (`min > max`) is kept as given and makes the model
    /// infeasible.
    pub fn new_int_var(&mut self, name: impl Into<String>, min: i64, max: i64) -> IntVar {
        IntVar(self.push_var(name.into(), Domain::Int { min, max }))
    }

    /// Adds `expr ⋈ rhs`.
    pub fn add_linear(&mut self, expr: LinearExpr, cmp: Comparison, rhs: i64) {
        self.constraints.push(CpConstraint::Linear { expr, cmp, rhs });
    }

    /// Adds `expr = rhs`.
    pub fn add_eq(&mut self, expr: impl Into<LinearExpr>, rhs: i64) {
        self.add_linear(expr.into(), Comparison::Eq, rhs);
    }

    /// Adds `expr ≤ rhs`.
    pub fn add_le(&mut self, expr: impl Into<LinearExpr>, rhs: i64) {
        self.add_linear(expr.into(), Comparison::Le, rhs);
    }

    /// Adds `expr ≥ rhs`.
    pub fn add_ge(&mut self, expr: impl Into<LinearExpr>, rhs: i64) {
        self.add_linear(expr.into(), Comparison::Ge, rhs);
    }

    /// Adds `antecedent ⇒ consequent`.
    pub fn add_implication(&mut self, antecedent: impl Into<Literal>, consequent: impl Into<Literal>) {
        self.constraints.push(CpConstraint::Implication {
            antecedent: antecedent.into(),
            consequent: consequent.into(),
        });
    }

    /// Adds `target = max(exprs)`. An empty list leaves `target` unconstrained
    /// by this call and is ignored.
    pub fn add_max_equality(&mut self, target: IntVar, exprs: Vec<LinearExpr>) {
        if exprs.is_empty() {
            return;
        }
        self.constraints
            .push(CpConstraint::MaxEquality { target, exprs });
    }

    /// Sets the expression to minimize, replacing any previous objective.
    pub fn minimize(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    /// The objective expression (zero if never set).
    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// All constraints in insertion order.
    pub fn constraints(&self) -> &[CpConstraint] {
        &self.constraints
    }

    /// All variables in declaration order.
    pub fn vars(&self) -> &[VarInfo] {
        &self.vars
    }

    /// Domain of a variable.
    pub fn domain(&self, var: VarId) -> Option<Domain> {
        self.vars.get(var.index()).map(|v| v.domain)
    }

    /// Name of a variable.
    pub fn var_name(&self, var: VarId) -> Option<&str> {
        self.vars.get(var.index()).map(|v| v.name.as_str())
    }

    /// Number of declared variables.
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Number of boolean variables.
    pub fn bool_var_count(&self) -> usize {
        self.vars
            .iter()
            .filter(|v| v.domain == Domain::Bool)
            .count()
    }

    /// Number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Interval bounds of an expression over the declared domains.
    pub fn expr_bounds(&self, expr: &LinearExpr) -> (i64, i64) {
        expr.terms().iter().fold(
            (expr.constant_term(), expr.constant_term()),
            |(lo, hi), &(c, v)| {
                let (dlo, dhi) = self.domain(v).map(|d| d.bounds()).unwrap_or((0, 0));
                if c >= 0 {
                    (lo + c * dlo, hi + c * dhi)
                } else {
                    (lo + c * dhi, hi + c * dlo)
                }
            },
        )
    }

    /// Indices of constraints violated by a full assignment, plus any
    /// variable whose value lies outside its domain (reported as `None`).
    pub fn violations(&self, values: &[i64]) -> Vec<Option<usize>> {
        let value_of = |v: VarId| values.get(v.index()).copied().unwrap_or(0);
        let mut out: Vec<Option<usize>> = Vec::new();
        if values.len() != self.vars.len()
            || self
                .vars
                .iter()
                .zip(values)
                .any(|(info, &x)| !info.domain.contains(x))
        {
            out.push(None);
        }
        out.extend(
            self.constraints
                .iter()
                .enumerate()
                .filter(|(_, c)| !c.is_satisfied(value_of))
                .map(|(i, _)| Some(i)),
        );
        out
    }
}
