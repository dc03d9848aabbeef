//! Fairness indicators recomputed from a finished schedule.
//!
//! Evaluates the same four cost definitions the model optimizes, but from
//! the projected [`OnCallSchedule`] alone, with no solver involved. For a
//! schedule read from a valuation, every value here equals the value of the
//! corresponding cost term under that valuation.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Rotation cost | Σ over rotation groups and members of \|w − 1\| |
//! | Target cost | max over members of \|w(nonWorking) − target\| |
//! | Workload | Slots on call, overall and outside working hours |

use serde::Serialize;

use crate::models::{CostBreakdown, CostKind, OnCallProblem, OnCallSchedule, Role};

/// Workload of one employee in one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeWorkload {
    pub employee: String,
    /// Display name of the employee.
    pub name: String,
    pub role: Role,
    /// Slots on call over the whole horizon.
    pub total: usize,
    /// Slots on call outside working hours.
    pub non_working: usize,
    /// Declared non-working target.
    pub target: u32,
}

impl EmployeeWorkload {
    /// `|non_working − target|`.
    pub fn target_deviation(&self) -> i64 {
        (self.non_working as i64 - i64::from(self.target)).abs()
    }
}

/// Fairness indicators of a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FairnessKpi {
    pub rotation_escalation: i64,
    pub rotation_normal: i64,
    pub target_escalation: i64,
    pub target_normal: i64,
    /// Per pool member, normal pool first, registry order within a pool.
    pub workloads: Vec<EmployeeWorkload>,
}

impl FairnessKpi {
    /// Computes the indicators of `schedule` for `problem`.
    pub fn calculate(schedule: &OnCallSchedule, problem: &OnCallProblem) -> Self {
        let non_working = problem.slots.non_working_slots();
        let mut workloads = Vec::new();
        for role in Role::ALL {
            for idx in problem.pool(role) {
                let Some(employee) = problem.employees.get(idx) else {
                    continue;
                };
                workloads.push(EmployeeWorkload {
                    employee: employee.id.clone(),
                    name: employee.display_name().to_string(),
                    role,
                    total: schedule.workload(role, &employee.id, problem.slots.iter()),
                    non_working: schedule.workload(role, &employee.id, non_working.iter().copied()),
                    target: employee.target_workload(role).unwrap_or(0),
                });
            }
        }

        Self {
            rotation_escalation: rotation_cost(schedule, problem, Role::Escalation),
            rotation_normal: rotation_cost(schedule, problem, Role::Normal),
            target_escalation: target_cost(&workloads, Role::Escalation),
            target_normal: target_cost(&workloads, Role::Normal),
            workloads,
        }
    }

    /// Value of one cost term.
    pub fn value(&self, kind: CostKind) -> i64 {
        match kind {
            CostKind::RotationEscalation => self.rotation_escalation,
            CostKind::RotationNormal => self.rotation_normal,
            CostKind::TargetEscalation => self.target_escalation,
            CostKind::TargetNormal => self.target_normal,
        }
    }

    /// Whether every term in `costs` has the value recomputed here.
    pub fn matches(&self, costs: &CostBreakdown) -> bool {
        costs.terms.iter().all(|t| t.value == self.value(t.kind))
    }

    /// Workloads of `role`'s pool members.
    pub fn workloads_for(&self, role: Role) -> impl Iterator<Item = &EmployeeWorkload> {
        self.workloads.iter().filter(move |w| w.role == role)
    }

    /// Difference between the busiest and the idlest member of `role`'s pool.
    pub fn workload_spread(&self, role: Role) -> usize {
        let max = self.workloads_for(role).map(|w| w.total).max().unwrap_or(0);
        let min = self.workloads_for(role).map(|w| w.total).min().unwrap_or(0);
        max - min
    }
}

fn rotation_cost(schedule: &OnCallSchedule, problem: &OnCallProblem, role: Role) -> i64 {
    let pool = problem.pool(role);
    let mut cost = 0i64;
    for group in problem.slots.rotation_groups(pool.len()) {
        for &idx in &pool {
            if let Some(employee) = problem.employees.get(idx) {
                let w = schedule.workload(role, &employee.id, group.clone()) as i64;
                cost += (w - 1).abs();
            }
        }
    }
    cost
}

fn target_cost(workloads: &[EmployeeWorkload], role: Role) -> i64 {
    workloads
        .iter()
        .filter(|w| w.role == role)
        .map(EmployeeWorkload::target_deviation)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostValue, Employee, TimeSlots};

    fn problem() -> OnCallProblem {
        // non-working: 0, 3
        OnCallProblem::new(TimeSlots::new(4).with_working_hours([1, 2])).with_employees([
            Employee::new("a").with_name("Ann").normal(1),
            Employee::new("b").normal(0).escalation(2),
            Employee::new("c").escalation(0),
        ])
    }

    fn schedule() -> OnCallSchedule {
        OnCallSchedule::new()
            .with(0, Role::Normal, "a")
            .with(0, Role::Escalation, "c")
            .with(1, Role::Normal, "b")
            .with(1, Role::Escalation, "c")
            .with(2, Role::Normal, "a")
            .with(2, Role::Escalation, "b")
            .with(3, Role::Normal, "b")
            .with(3, Role::Escalation, "c")
    }

    #[test]
    fn test_calculate() {
        let kpi = FairnessKpi::calculate(&schedule(), &problem());

        // normal groups [0,1] [2,3]: a, b once each
        assert_eq!(kpi.rotation_normal, 0);
        // escalation groups [0,1] [2,3]: c twice then once each
        assert_eq!(kpi.rotation_escalation, 2);
        // a: 1 vs 1, b: 1 vs 0
        assert_eq!(kpi.target_normal, 1);
        // b: 0 vs 2, c: 2 vs 0
        assert_eq!(kpi.target_escalation, 2);
        assert_eq!(kpi.workloads.len(), 4);
    }

    #[test]
    fn test_workloads() {
        let kpi = FairnessKpi::calculate(&schedule(), &problem());
        let escalation: Vec<_> = kpi.workloads_for(Role::Escalation).collect();
        assert_eq!(escalation[0].employee, "b");
        assert_eq!(escalation[0].name, "b");
        let normal: Vec<_> = kpi.workloads_for(Role::Normal).collect();
        assert_eq!(normal[0].name, "Ann");
        assert_eq!(escalation[0].total, 1);
        assert_eq!(escalation[1].total, 3);
        assert_eq!(escalation[1].non_working, 2);
        assert_eq!(kpi.workload_spread(Role::Escalation), 2);
        assert_eq!(kpi.workload_spread(Role::Normal), 0);
    }

    #[test]
    fn test_matches_breakdown() {
        let kpi = FairnessKpi::calculate(&schedule(), &problem());
        let mut costs = CostBreakdown {
            terms: CostKind::DEFAULT_PRIORITY
                .iter()
                .map(|&kind| CostValue {
                    kind,
                    value: kpi.value(kind),
                    upper_bound: 4,
                    weight: 1,
                })
                .collect(),
            weighted_total: 0,
        };
        assert!(kpi.matches(&costs));

        costs.terms[0].value += 1;
        assert!(!kpi.matches(&costs));
    }

    #[test]
    fn test_empty_schedule() {
        let kpi = FairnessKpi::calculate(&OnCallSchedule::new(), &problem());
        // every member misses every group
        assert_eq!(kpi.rotation_normal, 4);
        assert_eq!(kpi.target_escalation, 2);
    }
}
