//! Reads a solver valuation back into domain terms.

use super::grid::AssignmentGrids;
use super::objective::Objective;
use crate::cp::CpSolution;
use crate::models::{
    CostBreakdown, CostValue, OnCallAssignment, OnCallProblem, OnCallSchedule, Role, SolveReport,
};

/// Schedule of the valuation, ordered by slot, then role (normal first).
pub fn project_schedule(
    problem: &OnCallProblem,
    grids: &AssignmentGrids,
    solution: &CpSolution,
) -> OnCallSchedule {
    let mut schedule = OnCallSchedule::new();
    for t in problem.slots.iter() {
        for role in Role::ALL {
            for (idx, row) in grids.get(role).rows() {
                if !solution.bool_value(row[t]) {
                    continue;
                }
                if let Some(employee) = problem.employees.get(idx) {
                    schedule.add_assignment(OnCallAssignment::new(t, role, employee.id.clone()));
                }
            }
        }
    }
    schedule
}

/// Value of every cost term under the valuation, plus the weighted total.
pub fn project_costs(objective: &Objective, solution: &CpSolution) -> CostBreakdown {
    CostBreakdown {
        terms: objective
            .terms
            .iter()
            .map(|t| CostValue {
                kind: t.term.kind,
                value: solution.evaluate(&t.term.expr),
                upper_bound: t.term.upper_bound,
                weight: t.weight,
            })
            .collect(),
        weighted_total: solution.evaluate(&objective.expr),
    }
}

/// Builds the run report. Without a valuation only the status and the
/// solver diagnostic are carried over.
pub fn project(
    problem: &OnCallProblem,
    grids: &AssignmentGrids,
    objective: &Objective,
    solution: CpSolution,
) -> SolveReport {
    if !solution.is_solution_found() {
        return SolveReport::unsolved(solution.status, solution.message);
    }
    SolveReport {
        status: solution.status,
        schedule: Some(project_schedule(problem, grids, &solution)),
        costs: Some(project_costs(objective, &solution)),
        message: solution.message,
    }
}
