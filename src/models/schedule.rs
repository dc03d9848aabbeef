//! On-call schedule (solution) model.
//!
//! A schedule records, for every slot and role, which employee is on call.
//! A solve run wraps it in a [`SolveReport`] together with the solver
//! status and the fairness cost breakdown.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Role;
use crate::cp::SolveStatus;

/// A complete on-call schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnCallSchedule {
    /// Slot-role-employee assignments, ordered by slot then role.
    pub assignments: Vec<OnCallAssignment>,
}

/// One employee on call in one role for one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnCallAssignment {
    pub slot: usize,
    pub role: Role,
    pub employee: String,
}

impl OnCallAssignment {
    /// Creates an assignment.
    pub fn new(slot: usize, role: Role, employee: impl Into<String>) -> Self {
        Self {
            slot,
            role,
            employee: employee.into(),
        }
    }
}

impl OnCallSchedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: OnCallAssignment) {
        self.assignments.push(assignment);
    }

    /// Builder: adds an assignment.
    pub fn with(mut self, slot: usize, role: Role, employee: impl Into<String>) -> Self {
        self.add_assignment(OnCallAssignment::new(slot, role, employee));
        self
    }

    /// Employee on call in `role` during `slot`.
    ///
    /// Returns the first match; a schedule produced by the solver holds at
    /// most one per slot and role.
    pub fn on_call(&self, role: Role, slot: usize) -> Option<&str> {
        self.assignments
            .iter()
            .find(|a| a.role == role && a.slot == slot)
            .map(|a| a.employee.as_str())
    }

    /// All employees assigned to `role` during `slot`.
    pub fn all_on_call(&self, role: Role, slot: usize) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|a| a.role == role && a.slot == slot)
            .map(|a| a.employee.as_str())
            .collect()
    }

    /// Slot → employee view of one role over `slot_count` slots.
    pub fn roster(&self, role: Role, slot_count: usize) -> Vec<Option<&str>> {
        (0..slot_count).map(|t| self.on_call(role, t)).collect()
    }

    /// Slots in which `employee` is on call in `role`, ascending.
    pub fn slots_for(&self, role: Role, employee: &str) -> Vec<usize> {
        let mut slots: Vec<usize> = self
            .assignments
            .iter()
            .filter(|a| a.role == role && a.employee == employee)
            .map(|a| a.slot)
            .collect();
        slots.sort_unstable();
        slots
    }

    /// Number of slots among `slots` in which `employee` is on call in `role`.
    pub fn workload(&self, role: Role, employee: &str, slots: impl IntoIterator<Item = usize>) -> usize {
        slots
            .into_iter()
            .filter(|&t| self.all_on_call(role, t).contains(&employee))
            .count()
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }
}

/// The four fairness cost terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostKind {
    /// Deviation from one escalation slot per employee per rotation.
    RotationEscalation,
    /// Deviation from one normal slot per employee per rotation.
    RotationNormal,
    /// Worst escalation deviation from a target workload.
    TargetEscalation,
    /// Worst normal deviation from a target workload.
    TargetNormal,
}

impl CostKind {
    /// Default objective order. Weights grow along it, so `TargetNormal`
    /// weighs most and `RotationEscalation` least.
    pub const DEFAULT_PRIORITY: [CostKind; 4] = [
        CostKind::RotationEscalation,
        CostKind::RotationNormal,
        CostKind::TargetEscalation,
        CostKind::TargetNormal,
    ];

    /// Role whose grid the term reads.
    pub fn role(&self) -> Role {
        match self {
            CostKind::RotationEscalation | CostKind::TargetEscalation => Role::Escalation,
            CostKind::RotationNormal | CostKind::TargetNormal => Role::Normal,
        }
    }

    /// Whether the term measures rotation balance (as opposed to targets).
    pub fn is_rotation(&self) -> bool {
        matches!(self, CostKind::RotationEscalation | CostKind::RotationNormal)
    }

    /// The rotation term for `role`.
    pub fn rotation(role: Role) -> Self {
        match role {
            Role::Normal => CostKind::RotationNormal,
            Role::Escalation => CostKind::RotationEscalation,
        }
    }

    /// The target-workload term for `role`.
    pub fn target(role: Role) -> Self {
        match role {
            Role::Normal => CostKind::TargetNormal,
            Role::Escalation => CostKind::TargetEscalation,
        }
    }
}

impl fmt::Display for CostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_rotation() { "rotation" } else { "target" };
        write!(f, "{kind}-cost-{}", self.role())
    }
}

/// Concrete value of one cost term in a solved schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostValue {
    pub kind: CostKind,
    /// Value read from the solver valuation.
    pub value: i64,
    /// Static upper bound of the term.
    pub upper_bound: i64,
    /// Weight of the term in the objective.
    pub weight: i64,
}

/// Per-term costs and their weighted sum, in priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub terms: Vec<CostValue>,
    pub weighted_total: i64,
}

impl CostBreakdown {
    /// The entry for `kind`.
    pub fn get(&self, kind: CostKind) -> Option<&CostValue> {
        self.terms.iter().find(|t| t.kind == kind)
    }

    /// The value of `kind`.
    pub fn value(&self, kind: CostKind) -> Option<i64> {
        self.get(kind).map(|t| t.value)
    }
}

/// Output of one scheduling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveReport {
    /// Terminal solver status.
    pub status: SolveStatus,
    /// Projected schedule, present iff a solution was found.
    pub schedule: Option<OnCallSchedule>,
    /// Cost breakdown, present iff a solution was found.
    pub costs: Option<CostBreakdown>,
    /// Solver diagnostic, if any.
    pub message: Option<String>,
}

impl SolveReport {
    /// A report without a solution.
    pub fn unsolved(status: SolveStatus, message: Option<String>) -> Self {
        Self {
            status,
            schedule: None,
            costs: None,
            message,
        }
    }

    /// Whether a schedule is available.
    pub fn is_solution_found(&self) -> bool {
        self.schedule.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schedule() -> OnCallSchedule {
        OnCallSchedule::new()
            .with(0, Role::Normal, "a")
            .with(0, Role::Escalation, "c")
            .with(1, Role::Normal, "b")
            .with(1, Role::Escalation, "c")
            .with(2, Role::Normal, "a")
            .with(2, Role::Escalation, "b")
    }

    #[test]
    fn test_on_call_lookup() {
        let s = sample_schedule();
        assert_eq!(s.on_call(Role::Normal, 1), Some("b"));
        assert_eq!(s.on_call(Role::Escalation, 2), Some("b"));
        assert_eq!(s.on_call(Role::Normal, 3), None);
        assert_eq!(s.assignment_count(), 6);
    }

    #[test]
    fn test_roster_view() {
        let s = sample_schedule();
        assert_eq!(s.roster(Role::Normal, 4), vec![Some("a"), Some("b"), Some("a"), None]);
    }

    #[test]
    fn test_workload() {
        let s = sample_schedule();
        assert_eq!(s.slots_for(Role::Normal, "a"), vec![0, 2]);
        assert_eq!(s.workload(Role::Normal, "a", 0..3), 2);
        assert_eq!(s.workload(Role::Normal, "a", [1]), 0);
        assert_eq!(s.workload(Role::Escalation, "c", 0..3), 2);
    }

    #[test]
    fn test_cost_kind_mapping() {
        assert_eq!(CostKind::rotation(Role::Normal), CostKind::RotationNormal);
        assert_eq!(CostKind::target(Role::Escalation), CostKind::TargetEscalation);
        assert_eq!(CostKind::TargetNormal.role(), Role::Normal);
        assert!(CostKind::RotationEscalation.is_rotation());
        assert_eq!(CostKind::RotationEscalation.to_string(), "rotation-cost-escalation");
        assert_eq!(CostKind::TargetNormal.to_string(), "target-cost-normal");
    }

    #[test]
    fn test_breakdown_lookup() {
        let costs = CostBreakdown {
            terms: vec![CostValue {
                kind: CostKind::RotationNormal,
                value: 3,
                upper_bound: 12,
                weight: 1,
            }],
            weighted_total: 3,
        };
        assert_eq!(costs.value(CostKind::RotationNormal), Some(3));
        assert!(costs.get(CostKind::TargetNormal).is_none());
    }
}
