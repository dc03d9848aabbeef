//! Hard feasibility rules.
//!
//! # Rules
//! 1. **Availability**: a forced-on decision is fixed to 1, a forced-off
//!    decision to 0.
//! 2. **Coverage**: exactly one pool member is on call per slot and role.
//! 3. **No self-escalation**: an employee in both pools is never normal and
//!    escalation on call in the same slot.
//! 4. **No immediate repeat**: for the configured roles, an employee on call
//!    in slot `t` is not on call in slot `t + 1`.
//!
//! Generation never fails. Contradictory inputs surface as solver
//! infeasibility.

use tracing::debug;

use super::grid::{AssignmentGrid, AssignmentGrids};
use crate::config::ScheduleConfig;
use crate::cp::CpModel;
use crate::models::{Availability, OnCallProblem, Role};

/// Fixes forced decisions of `grid`'s role. Overrides that do not resolve
/// to a decision (unknown employee, slot out of range) are skipped.
pub fn add_availability(model: &mut CpModel, problem: &OnCallProblem, grid: &AssignmentGrid) {
    for (key, availability) in problem.availability.for_role(grid.role()) {
        let decision = problem
            .employees
            .index_of(&key.employee)
            .and_then(|idx| grid.var(idx, key.slot));
        let Some(decision) = decision else {
            debug!(role = %grid.role(), employee = %key.employee, slot = key.slot, "override skipped");
            continue;
        };
        match availability {
            Availability::ForcedOn => model.add_eq(decision, 1),
            Availability::ForcedOff => model.add_eq(decision, 0),
            Availability::Free => {}
        }
    }
}

/// Exactly one pool member per slot.
pub fn add_coverage(model: &mut CpModel, problem: &OnCallProblem, grid: &AssignmentGrid) {
    for t in problem.slots.iter() {
        model.add_eq(grid.coverage(t), 1);
    }
}

/// `normal(e, t) ⇒ ¬escalation(e, t)` for every employee in both pools.
pub fn add_no_self_escalation(model: &mut CpModel, problem: &OnCallProblem, grids: &AssignmentGrids) {
    for (idx, normal_row) in grids.normal.rows() {
        for t in problem.slots.iter() {
            if let Some(escalation) = grids.escalation.var(idx, t) {
                model.add_implication(normal_row[t], !escalation);
            }
        }
    }
}

/// `x(e, t) ⇒ ¬x(e, t + 1)` for every pool member of `grid`'s role.
pub fn add_no_repeat(model: &mut CpModel, problem: &OnCallProblem, grid: &AssignmentGrid) {
    for (_, row) in grid.rows() {
        for (t, next) in problem.slots.consecutive_pairs() {
            model.add_implication(row[t], !row[next]);
        }
    }
}

/// Emits every hard rule and returns the number of constraints added.
pub fn add_hard_constraints(
    model: &mut CpModel,
    problem: &OnCallProblem,
    grids: &AssignmentGrids,
    config: &ScheduleConfig,
) -> usize {
    let before = model.constraint_count();

    for role in Role::ALL {
        let grid = grids.get(role);
        add_availability(model, problem, grid);
        add_coverage(model, problem, grid);
        if config.forbids_repeat(role) {
            add_no_repeat(model, problem, grid);
        }
    }
    add_no_self_escalation(model, problem, grids);

    let added = model.constraint_count() - before;
    debug!(constraints = added, "hard constraints emitted");
    added
}
