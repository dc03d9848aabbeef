//! Assignment variable grid.
//!
//! For one role, one boolean decision per (pool member, slot): "this
//! employee is on call in this role during this slot". Workloads are
//! derived from the grid as linear expressions and never stored.

use std::ops::Range;

use crate::cp::{BoolVar, CpModel, LinearExpr};
use crate::models::{OnCallProblem, Role};

/// Decision variables of one role.
#[derive(Debug, Clone)]
pub struct AssignmentGrid {
    role: Role,
    /// Registry indices of pool members, in registry order.
    members: Vec<usize>,
    /// `vars[member position][slot]`.
    vars: Vec<Vec<BoolVar>>,
}

impl AssignmentGrid {
    /// Declares the decision variables of `role` in `model`.
    pub fn allocate(model: &mut CpModel, problem: &OnCallProblem, role: Role) -> Self {
        let members = problem.pool(role);
        let vars = members
            .iter()
            .map(|&idx| {
                let id = problem
                    .employees
                    .get(idx)
                    .map(|e| e.id.as_str())
                    .unwrap_or_default();
                problem
                    .slots
                    .iter()
                    .map(|t| model.new_bool_var(format!("{role}[{id}][{t}]")))
                    .collect()
            })
            .collect();

        Self {
            role,
            members,
            vars,
        }
    }

    /// Role of the grid.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Registry indices of pool members.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Number of pool members.
    pub fn pool_size(&self) -> usize {
        self.members.len()
    }

    /// Decision of the member at registry index `employee` for `slot`, or
    /// `None` when the employee is not in the pool or the slot is out of range.
    pub fn var(&self, employee: usize, slot: usize) -> Option<BoolVar> {
        let pos = self.members.iter().position(|&m| m == employee)?;
        self.vars[pos].get(slot).copied()
    }

    /// Decisions of all pool members for `slot`, in pool order.
    pub fn slot_vars(&self, slot: usize) -> Vec<BoolVar> {
        self.vars
            .iter()
            .filter_map(|row| row.get(slot).copied())
            .collect()
    }

    /// `(registry index, decisions by slot)` for every pool member.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[BoolVar])> {
        self.members
            .iter()
            .copied()
            .zip(self.vars.iter().map(Vec::as_slice))
    }

    /// `Σ_{t ∈ slots} decision(employee, t)`. Slots outside the horizon and
    /// employees outside the pool contribute nothing.
    pub fn workload(&self, employee: usize, slots: impl IntoIterator<Item = usize>) -> LinearExpr {
        LinearExpr::sum(slots.into_iter().filter_map(|t| self.var(employee, t)))
    }

    /// Workload over a contiguous slot range.
    pub fn range_workload(&self, employee: usize, slots: Range<usize>) -> LinearExpr {
        self.workload(employee, slots)
    }

    /// Number of on-call employees in `slot` (the coverage expression).
    pub fn coverage(&self, slot: usize) -> LinearExpr {
        LinearExpr::sum(self.slot_vars(slot))
    }
}

/// The grids of both roles.
#[derive(Debug, Clone)]
pub struct AssignmentGrids {
    pub normal: AssignmentGrid,
    pub escalation: AssignmentGrid,
}

impl AssignmentGrids {
    /// Declares the decision variables of both roles, normal first.
    pub fn allocate(model: &mut CpModel, problem: &OnCallProblem) -> Self {
        let normal = AssignmentGrid::allocate(model, problem, Role::Normal);
        let escalation = AssignmentGrid::allocate(model, problem, Role::Escalation);
        Self { normal, escalation }
    }

    /// Grid of `role`.
    pub fn get(&self, role: Role) -> &AssignmentGrid {
        match role {
            Role::Normal => &self.normal,
            Role::Escalation => &self.escalation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, TimeSlots};

    fn problem() -> OnCallProblem {
        OnCallProblem::new(TimeSlots::new(3)).with_employees([
            Employee::new("a").normal(0),
            Employee::new("b").normal(0).escalation(0),
            Employee::new("c").escalation(0),
        ])
    }

    #[test]
    fn test_allocation_sizes() {
        let p = problem();
        let mut model = CpModel::new("grid");
        let grids = AssignmentGrids::allocate(&mut model, &p);

        assert_eq!(grids.normal.members(), &[0, 1]);
        assert_eq!(grids.escalation.members(), &[1, 2]);
        // 2 members × 3 slots per role
        assert_eq!(model.bool_var_count(), 12);
        assert_eq!(model.var_name(grids.normal.var(1, 2).unwrap().id()), Some("normal[b][2]"));
    }

    #[test]
    fn test_var_lookup_outside_pool() {
        let p = problem();
        let mut model = CpModel::new("grid");
        let grids = AssignmentGrids::allocate(&mut model, &p);

        assert!(grids.normal.var(2, 0).is_none());
        assert!(grids.escalation.var(0, 0).is_none());
        assert!(grids.normal.var(0, 3).is_none());
    }

    #[test]
    fn test_workload_expression() {
        let p = problem();
        let mut model = CpModel::new("grid");
        let grids = AssignmentGrids::allocate(&mut model, &p);
        let grid = grids.get(Role::Normal);

        let w = grid.workload(0, [0, 2, 7]);
        assert_eq!(w.terms().len(), 2);
        // a on call everywhere
        let a_vars: Vec<_> = (0..3).filter_map(|t| grid.var(0, t)).collect();
        let value = w.evaluate(|v| i64::from(a_vars.iter().any(|a| a.id() == v)));
        assert_eq!(value, 2);
        assert_eq!(grid.range_workload(1, 0..3).terms().len(), 3);
    }

    #[test]
    fn test_coverage_expression() {
        let p = problem();
        let mut model = CpModel::new("grid");
        let grids = AssignmentGrids::allocate(&mut model, &p);
        assert_eq!(grids.escalation.coverage(1).terms().len(), 2);
        assert_eq!(grids.escalation.rows().count(), 2);
    }
}
