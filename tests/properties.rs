//! Randomized checks over small seeded instances.
//!
//! Instances are generated so they are always feasible: three normal
//! responders with at most one forced off per slot, and an escalation-only
//! responder who is never forced off.

mod common;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use u_oncall::config::ScheduleConfig;
use u_oncall::cp::{MilpSolver, SolveStatus};
use u_oncall::models::{AvailabilityMap, Employee, OnCallProblem, Role, TimeSlots};
use u_oncall::roster::{audit_schedule, FairnessKpi, OnCallCpBuilder};
use u_oncall::validation::{escalation_target_bound, normal_target_bound};

use common::{assert_hard_rules, init_test};

const SEEDS: [u64; 8] = [1, 7, 42, 99, 123, 2024, 31337, 65535];

fn random_problem(rng: &mut StdRng) -> OnCallProblem {
    let slot_count = rng.random_range(3..=6);
    let working: Vec<usize> = (0..slot_count).filter(|_| rng.random_bool(0.4)).collect();
    let mut problem = OnCallProblem::new(TimeSlots::new(slot_count).with_working_hours(working));

    let normal_ids = ["n0", "n1", "n2"];
    for t in 0..slot_count {
        if rng.random_bool(0.3) {
            let id = normal_ids[rng.random_range(0..normal_ids.len())];
            problem = problem.force_off(Role::Normal, id, t);
        }
        if rng.random_bool(0.3) {
            let id = ["n0", "n1"][rng.random_range(0..2)];
            problem = problem.force_off(Role::Escalation, id, t);
        }
    }

    let non_working = problem.slots.non_working_slots().len();
    let normal_cap = normal_target_bound(non_working);
    for (i, id) in normal_ids.iter().enumerate() {
        let mut employee = Employee::new(*id).normal(rng.random_range(0..=normal_cap));
        if i < 2 {
            let forced_off = problem.availability.forced_off_count(Role::Escalation, id);
            let cap = escalation_target_bound(non_working, forced_off);
            employee = employee.escalation(rng.random_range(0..=cap));
        }
        problem = problem.with_employee(employee);
    }
    let x_cap = escalation_target_bound(non_working, 0);
    problem.with_employee(Employee::new("x").escalation(rng.random_range(0..=x_cap)))
}

#[test]
fn test_random_instances_satisfy_hard_rules() {
    init_test();
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let problem = random_problem(&mut rng);
        let report = OnCallCpBuilder::new(&problem)
            .solve(&MilpSolver::new())
            .unwrap();

        assert_eq!(report.status, SolveStatus::Optimal, "seed {seed}");
        let schedule = report.schedule.as_ref().unwrap();
        assert_hard_rules(schedule, problem.slots.len());
        let violations = audit_schedule(schedule, &problem, &ScheduleConfig::default());
        assert!(violations.is_empty(), "seed {seed}: {violations:?}");
    }
}

#[test]
fn test_random_instances_projection_is_idempotent() {
    init_test();
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let problem = random_problem(&mut rng);
        let report = OnCallCpBuilder::new(&problem)
            .solve(&MilpSolver::new())
            .unwrap();
        let schedule = report.schedule.as_ref().unwrap();
        let costs = report.costs.as_ref().unwrap();

        let kpi = FairnessKpi::calculate(schedule, &problem);
        assert!(kpi.matches(costs), "seed {seed}: {kpi:?} vs {costs:?}");

        let weighted: i64 = costs.terms.iter().map(|t| t.value * t.weight).sum();
        assert_eq!(weighted, costs.weighted_total, "seed {seed}");
    }
}

#[test]
fn test_random_instances_respect_bounds() {
    init_test();
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let problem = random_problem(&mut rng);
        let report = OnCallCpBuilder::new(&problem)
            .solve(&MilpSolver::new())
            .unwrap();
        let costs = report.costs.as_ref().unwrap();
        let non_working = problem.slots.non_working_slots().len() as i64;

        for term in &costs.terms {
            assert!(term.value >= 0, "seed {seed}: {}", term.kind);
            assert!(term.value <= term.upper_bound, "seed {seed}: {}", term.kind);
            if !term.kind.is_rotation() {
                assert!(term.value <= non_working, "seed {seed}: {}", term.kind);
            }
        }
    }
}

#[test]
fn test_repeat_free_escalation_when_configured() {
    init_test();
    let config = ScheduleConfig::default().with_no_repeat_roles(vec![Role::Normal, Role::Escalation]);
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        // escalation forced-offs could make this variant infeasible
        let mut problem = random_problem(&mut rng);
        let mut normal_only = AvailabilityMap::new();
        for (key, availability) in problem.availability.for_role(Role::Normal) {
            normal_only.set(key.role, key.employee.clone(), key.slot, availability);
        }
        problem.availability = normal_only;

        let report = OnCallCpBuilder::new(&problem)
            .with_config(config.clone())
            .solve(&MilpSolver::new())
            .unwrap();
        assert_eq!(report.status, SolveStatus::Optimal, "seed {seed}");
        let schedule = report.schedule.as_ref().unwrap();
        assert!(audit_schedule(schedule, &problem, &config).is_empty(), "seed {seed}");
    }
}
