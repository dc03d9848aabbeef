//! Solver interface.
//!
//! The search engine is a collaborator behind the [`CpSolver`] trait. A
//! solve is one synchronous call that always returns a [`CpSolution`]:
//! infeasibility, timeouts and engine failures are statuses, not errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::expr::{BoolVar, IntVar, LinearExpr, VarId};
use super::model::CpModel;

/// Terminal status of a solve call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    /// A provably optimal solution was found.
    Optimal,
    /// A solution was found but optimality was not proven.
    Feasible,
    /// No solution exists.
    Infeasible,
    /// The search stopped (e.g. time limit) without a conclusion.
    Unknown,
    /// The engine failed.
    Error,
}

impl SolveStatus {
    /// Whether the status carries a valuation.
    pub fn has_solution(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolveStatus::Optimal => "OPTIMAL",
            SolveStatus::Feasible => "FEASIBLE",
            SolveStatus::Infeasible => "INFEASIBLE",
            SolveStatus::Unknown => "UNKNOWN",
            SolveStatus::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// Search settings passed to every solve call.
///
/// Adapters honour the settings they support and ignore the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Wall-clock limit for the search. `None` = unlimited.
    pub time_limit: Option<Duration>,
}

impl SolverConfig {
    /// Sets the time limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// Result of a solve call: a status and, on success, one value per variable.
///
/// The valuation is owned and immutable, so it stays stable for as long as
/// the caller reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpSolution {
    pub status: SolveStatus,
    values: Vec<i64>,
    /// Objective value under the valuation, when one exists.
    pub objective_value: Option<i64>,
    /// Engine diagnostic (error text, timeout notice).
    pub message: Option<String>,
}

impl CpSolution {
    /// A solution carrying a valuation. The objective is evaluated from the
    /// values so it is integer-exact regardless of the engine.
    pub fn with_values(status: SolveStatus, model: &CpModel, values: Vec<i64>) -> Self {
        let objective_value = model
            .objective()
            .evaluate(|v| values.get(v.index()).copied().unwrap_or(0));
        Self {
            status,
            values,
            objective_value: Some(objective_value),
            message: None,
        }
    }

    /// A solution without a valuation.
    pub fn without_values(status: SolveStatus, message: Option<String>) -> Self {
        Self {
            status,
            values: Vec::new(),
            objective_value: None,
            message,
        }
    }

    /// Whether a valuation is available.
    pub fn is_solution_found(&self) -> bool {
        self.status.has_solution() && !self.values.is_empty()
    }

    /// Raw value of a variable (0 when no valuation exists).
    pub fn value(&self, var: VarId) -> i64 {
        self.values.get(var.index()).copied().unwrap_or(0)
    }

    /// Truth value of a boolean variable.
    pub fn bool_value(&self, var: BoolVar) -> bool {
        self.value(var.id()) != 0
    }

    /// Value of an integer variable.
    pub fn int_value(&self, var: IntVar) -> i64 {
        self.value(var.id())
    }

    /// Value of an expression under the valuation.
    pub fn evaluate(&self, expr: &LinearExpr) -> i64 {
        expr.evaluate(|v| self.value(v))
    }

    /// All values in variable order.
    pub fn values(&self) -> &[i64] {
        &self.values
    }
}

/// A search engine able to solve a [`CpModel`].
pub trait CpSolver {
    /// Engine name for logs.
    fn name(&self) -> &'static str;

    /// Searches for a minimum of the model's objective.
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> CpSolution;
}
