//! MILP solver adapter backed by `good_lp` and its pure-Rust `microlp`
//! backend.
//!
//! # Linearization
//! - Booleans become binary variables, integers become bounded integers.
//! - `a ⇒ b` becomes `lit(a) ≤ lit(b)` where `lit(¬x) = 1 − x`.
//! - `t = max(e₁..eₙ)` becomes `t ≥ eⱼ` for every `j`, plus one selector
//!   binary `zⱼ` per expression with `Σ zⱼ = 1` and
//!   `t ≤ eⱼ + Mⱼ(1 − zⱼ)`, where `Mⱼ = ub(t) − lb(eⱼ)` is taken from the
//!   declared domains. The encoding is exact, not merely a bound.
//!
//! # Time limit
//! [`SolverConfig::time_limit`] is forwarded to `microlp` through
//! [`WithTimeLimit`]. When it expires with an incumbent the valuation is
//! returned as [`SolveStatus::Feasible`]; without one the call returns
//! [`SolveStatus::Unknown`].
//!
//! # Reference
//! Williams (2013), "Model Building in Mathematical Programming", Ch. 9

use good_lp::solvers::microlp::microlp;
use good_lp::{
    constraint, variable, Constraint, Expression, ProblemVariables, ResolutionError, Solution,
    SolutionStatus, SolverModel, Variable, WithTimeLimit,
};
use tracing::{debug, warn};

use super::expr::LinearExpr;
use super::model::{CpConstraint, CpModel, Domain};
use super::solver::{CpSolution, CpSolver, SolveStatus, SolverConfig};
use super::Comparison;

/// Exact MILP adapter.
///
/// Without a time limit every solution is proven optimal. With one, an
/// interrupted search reports `Feasible` (incumbent kept) or `Unknown`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MilpSolver;

impl MilpSolver {
    /// Creates the adapter.
    pub fn new() -> Self {
        Self
    }
}

impl CpSolver for MilpSolver {
    fn name(&self) -> &'static str {
        "good_lp/microlp"
    }

    fn solve(&self, model: &CpModel, config: &SolverConfig) -> CpSolution {
        solve_milp(model, config)
    }
}

/// Maps the engine's verdict on a returned solution.
fn solution_status(status: SolutionStatus) -> SolveStatus {
    match status {
        SolutionStatus::Optimal => SolveStatus::Optimal,
        SolutionStatus::TimeLimit | SolutionStatus::GapLimit => SolveStatus::Feasible,
    }
}

fn to_expression(expr: &LinearExpr, vars: &[Variable]) -> Expression {
    let mut out = Expression::from(expr.constant_term() as f64);
    for &(coefficient, var) in expr.terms() {
        out.add_mul(coefficient as f64, vars[var.index()]);
    }
    out
}

fn linear(lhs: Expression, cmp: Comparison, rhs: Expression) -> Constraint {
    match cmp {
        Comparison::Eq => constraint::eq(lhs, rhs),
        Comparison::Le => constraint::leq(lhs, rhs),
        Comparison::Ge => constraint::geq(lhs, rhs),
    }
}

fn solve_milp(model: &CpModel, config: &SolverConfig) -> CpSolution {
    let mut problem_vars = ProblemVariables::new();

    let vars: Vec<Variable> = model
        .vars()
        .iter()
        .map(|info| {
            let definition = match info.domain {
                Domain::Bool => variable().binary(),
                Domain::Int { min, max } => variable().integer().min(min as f64).max(max as f64),
            };
            problem_vars.add(definition.name(info.name.clone()))
        })
        .collect();

    // Selector binaries must exist before the variable set is frozen.
    let selectors: Vec<Vec<Variable>> = model
        .constraints()
        .iter()
        .enumerate()
        .map(|(i, c)| match c {
            CpConstraint::MaxEquality { exprs, .. } if exprs.len() > 1 => (0..exprs.len())
                .map(|j| problem_vars.add(variable().binary().name(format!("max{i}_sel{j}"))))
                .collect(),
            _ => Vec::new(),
        })
        .collect();

    let mut constraints: Vec<Constraint> = Vec::new();
    for (c, sel) in model.constraints().iter().zip(&selectors) {
        match c {
            CpConstraint::Linear { expr, cmp, rhs } => {
                constraints.push(linear(
                    to_expression(expr, &vars),
                    *cmp,
                    Expression::from(*rhs as f64),
                ));
            }
            CpConstraint::Implication {
                antecedent,
                consequent,
            } => {
                constraints.push(constraint::leq(
                    to_expression(&antecedent.to_expr(), &vars),
                    to_expression(&consequent.to_expr(), &vars),
                ));
            }
            CpConstraint::MaxEquality { target, exprs } => {
                let t = vars[target.id().index()];
                if let [only] = exprs.as_slice() {
                    constraints.push(constraint::eq(t, to_expression(only, &vars)));
                    continue;
                }
                let (_, t_max) = model.domain(target.id()).map(|d| d.bounds()).unwrap_or((0, 0));
                let mut one_hot = Expression::from(0.0);
                for (e, &z) in exprs.iter().zip(sel) {
                    let e_min = model.expr_bounds(e).0;
                    let big_m = (t_max - e_min).max(0) as f64;
                    constraints.push(constraint::geq(t, to_expression(e, &vars)));
                    // t ≤ e + M(1 − z)
                    let mut upper = to_expression(e, &vars) + Expression::from(big_m);
                    upper.add_mul(-big_m, z);
                    constraints.push(constraint::leq(t, upper));
                    one_hot.add_mul(1.0, z);
                }
                constraints.push(constraint::eq(one_hot, Expression::from(1.0)));
            }
        }
    }

    debug!(
        model = model.name(),
        variables = vars.len(),
        selectors = selectors.iter().map(Vec::len).sum::<usize>(),
        rows = constraints.len(),
        "handing model to microlp"
    );

    let objective = to_expression(model.objective(), &vars);
    let mut problem = problem_vars.minimise(objective).using(microlp);
    if let Some(limit) = config.time_limit {
        problem = problem.with_time_limit(limit.as_secs_f64());
    }
    for c in constraints {
        problem.add_constraint(c);
    }

    match problem.solve() {
        Ok(solution) => {
            let status = solution_status(solution.status());
            if status == SolveStatus::Feasible {
                warn!(model = model.name(), "time limit reached, returning incumbent");
            }
            let values = vars
                .iter()
                .map(|&v| solution.value(v).round() as i64)
                .collect();
            CpSolution::with_values(status, model, values)
        }
        Err(ResolutionError::Infeasible) => CpSolution::without_values(SolveStatus::Infeasible, None),
        // microlp's only `Other` outcome: the limit expired before any incumbent.
        Err(ResolutionError::Other(reason)) if config.time_limit.is_some() => {
            warn!(model = model.name(), reason, "time limit reached without a solution");
            CpSolution::without_values(SolveStatus::Unknown, Some(reason.to_string()))
        }
        Err(err) => CpSolution::without_values(SolveStatus::Error, Some(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_solve_exactly_one() {
        let mut model = CpModel::new("pick");
        let a = model.new_bool_var("a");
        let b = model.new_bool_var("b");
        model.add_eq(LinearExpr::sum([a, b]), 1);
        // prefer b
        model.minimize(LinearExpr::from(a) * 3 + LinearExpr::from(b));

        let sol = MilpSolver::new().solve(&model, &SolverConfig::default());
        assert_eq!(sol.status, SolveStatus::Optimal);
        assert!(!sol.bool_value(a));
        assert!(sol.bool_value(b));
        assert_eq!(sol.objective_value, Some(1));
        assert!(model.violations(sol.values()).is_empty());
    }

    #[test]
    fn test_implication() {
        let mut model = CpModel::new("imply");
        let a = model.new_bool_var("a");
        let b = model.new_bool_var("b");
        model.add_eq(LinearExpr::from(a), 1);
        model.add_implication(a, !b);
        model.minimize(-LinearExpr::from(b));

        let sol = MilpSolver::new().solve(&model, &SolverConfig::default());
        assert_eq!(sol.status, SolveStatus::Optimal);
        assert!(!sol.bool_value(b));
    }

    #[test]
    fn test_max_equality_is_exact() {
        // maximizing m must still leave it equal to max(x, y)
        let mut model = CpModel::new("max");
        let x = model.new_int_var("x", 0, 5);
        let y = model.new_int_var("y", 0, 5);
        let m = model.new_int_var("m", 0, 20);
        model.add_eq(LinearExpr::from(x), 2);
        model.add_eq(LinearExpr::from(y), 4);
        model.add_max_equality(m, vec![x.into(), y.into()]);
        model.minimize(-LinearExpr::from(m));

        let sol = MilpSolver::new().solve(&model, &SolverConfig::default());
        assert_eq!(sol.status, SolveStatus::Optimal);
        assert_eq!(sol.int_value(m), 4);
    }

    #[test]
    fn test_infeasible() {
        let mut model = CpModel::new("conflict");
        let a = model.new_bool_var("a");
        model.add_eq(LinearExpr::from(a), 1);
        model.add_eq(LinearExpr::from(a), 0);

        let sol = MilpSolver::new().solve(&model, &SolverConfig::default());
        assert_eq!(sol.status, SolveStatus::Infeasible);
        assert!(!sol.is_solution_found());
    }

    #[test]
    fn test_generous_time_limit_is_optimal() {
        let mut model = CpModel::new("limited");
        let a = model.new_bool_var("a");
        model.add_ge(LinearExpr::from(a), 1);
        model.minimize(LinearExpr::from(a));

        let config = SolverConfig::default().with_time_limit(Duration::from_secs(30));
        let sol = MilpSolver::new().solve(&model, &config);
        assert_eq!(sol.status, SolveStatus::Optimal);
        assert!(sol.bool_value(a));
    }

    #[test]
    fn test_zero_time_limit_is_unknown() {
        let mut model = CpModel::new("expired");
        let x = model.new_int_var("x", 0, 9);
        let a = model.new_bool_var("a");
        model.add_ge(LinearExpr::from(x) + LinearExpr::from(a), 3);
        model.minimize(LinearExpr::from(x) * 2 + LinearExpr::from(a));

        let config = SolverConfig::default().with_time_limit(Duration::ZERO);
        let sol = MilpSolver::new().solve(&model, &config);
        assert_eq!(sol.status, SolveStatus::Unknown);
        assert!(!sol.is_solution_found());
        assert!(sol.message.is_some());
    }

    #[test]
    fn test_interrupted_solution_is_feasible() {
        assert_eq!(solution_status(SolutionStatus::Optimal), SolveStatus::Optimal);
        assert_eq!(solution_status(SolutionStatus::TimeLimit), SolveStatus::Feasible);
        assert_eq!(solution_status(SolutionStatus::GapLimit), SolveStatus::Feasible);
    }
}
