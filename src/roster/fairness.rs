//! Fairness cost terms.
//!
//! Each term is a linear expression over the grid (plus auxiliary
//! integers) together with a provable upper bound that the objective
//! composer uses as its scaling factor.
//!
//! # Rotation cost
//! The horizon is cut into rotation groups of `|P|` slots, `|P|` being the
//! pool size. Ideally every member is on call exactly once per group:
//!
//! ```text
//! rotation = Σ_{r ∈ R} Σ_{e ∈ P} |w(r, e) − 1|        ≤ |R|·2·(|P| − 1)
//! ```
//!
//! # Target cost
//! Each member declares how many non-working-hours slots they want. The
//! worst deviation counts, not the sum, so one unreasonable target cannot
//! drown everybody else's fairness:
//!
//! ```text
//! target = max_{e ∈ P} |w(nonWorking, e) − target(e)|   ≤ |nonWorking|
//! ```
//!
//! # Absolute values
//! `|x − c|` is encoded with two integers `p = x − c`, `n = c − x` and a
//! third `a = max(p, n)`.
//!
//! # Reference
//! Williams (2013), "Model Building in Mathematical Programming", §9.4

use tracing::debug;

use super::grid::AssignmentGrid;
use crate::cp::{CpModel, IntVar, LinearExpr};
use crate::models::{CostKind, OnCallProblem};

/// One fairness cost term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostTerm {
    pub kind: CostKind,
    /// Value of the term as a linear expression of model variables.
    pub expr: LinearExpr,
    /// Largest value the term can take in any feasible schedule.
    pub upper_bound: i64,
}

impl CostTerm {
    /// A term that is identically zero.
    pub fn zero(kind: CostKind) -> Self {
        Self {
            kind,
            expr: LinearExpr::new(),
            upper_bound: 0,
        }
    }
}

/// Declares `a = |expr − reference|` with auxiliaries in `[−bound, bound]`.
pub fn abs_deviation(
    model: &mut CpModel,
    name: &str,
    expr: LinearExpr,
    reference: i64,
    bound: i64,
) -> IntVar {
    let above = model.new_int_var(format!("{name}_above"), -bound, bound);
    let below = model.new_int_var(format!("{name}_below"), -bound, bound);
    let abs = model.new_int_var(name, 0, bound);

    // above = expr − reference, below = reference − expr
    model.add_eq(expr.clone() - LinearExpr::from(above), reference);
    model.add_eq(expr + LinearExpr::from(below), reference);
    model.add_max_equality(abs, vec![above.into(), below.into()]);
    abs
}

/// `|R|·2·(|P| − 1)`.
pub fn rotation_upper_bound(group_count: usize, pool_size: usize) -> i64 {
    (group_count * 2 * pool_size.saturating_sub(1)) as i64
}

/// `max(|nonWorking|, largest target)`. The second operand only matters
/// when targets above the documented bound are let through.
pub fn target_upper_bound(non_working: usize, max_target: u32) -> i64 {
    (non_working as i64).max(i64::from(max_target))
}

/// Sum of per-group, per-member deviations from one slot per group.
pub fn rotation_cost(model: &mut CpModel, problem: &OnCallProblem, grid: &AssignmentGrid) -> CostTerm {
    let kind = CostKind::rotation(grid.role());
    let groups = problem.slots.rotation_groups(grid.pool_size());
    let horizon = problem.slots.len() as i64;

    let mut expr = LinearExpr::new();
    for (r, group) in groups.iter().enumerate() {
        for &employee in grid.members() {
            let workload = grid.range_workload(employee, group.clone());
            let abs = abs_deviation(model, &format!("{kind}[r{r}][e{employee}]"), workload, 1, horizon);
            expr += LinearExpr::from(abs);
        }
    }

    let upper_bound = rotation_upper_bound(groups.len(), grid.pool_size());
    debug!(cost = %kind, groups = groups.len(), upper_bound, "rotation cost");
    CostTerm {
        kind,
        expr,
        upper_bound,
    }
}

/// Worst per-member deviation from the target non-working workload.
pub fn target_cost(model: &mut CpModel, problem: &OnCallProblem, grid: &AssignmentGrid) -> CostTerm {
    let role = grid.role();
    let kind = CostKind::target(role);
    if grid.pool_size() == 0 {
        return CostTerm::zero(kind);
    }

    let non_working = problem.slots.non_working_slots();
    let targets: Vec<(usize, u32)> = grid
        .members()
        .iter()
        .map(|&idx| {
            let target = problem
                .employees
                .get(idx)
                .and_then(|e| e.target_workload(role))
                .unwrap_or(0);
            (idx, target)
        })
        .collect();
    let max_target = targets.iter().map(|&(_, t)| t).max().unwrap_or(0);
    let upper_bound = target_upper_bound(non_working.len(), max_target);
    let domain = upper_bound.max(problem.slots.len() as i64);

    let deviations: Vec<LinearExpr> = targets
        .into_iter()
        .map(|(employee, target)| {
            let workload = grid.workload(employee, non_working.iter().copied());
            let abs = abs_deviation(
                model,
                &format!("{kind}[e{employee}]"),
                workload,
                i64::from(target),
                domain,
            );
            LinearExpr::from(abs)
        })
        .collect();

    let worst = model.new_int_var(kind.to_string(), 0, upper_bound);
    model.add_max_equality(worst, deviations);

    debug!(cost = %kind, non_working = non_working.len(), upper_bound, "target cost");
    CostTerm {
        kind,
        expr: worst.into(),
        upper_bound,
    }
}
