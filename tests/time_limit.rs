//! Time-limited solves on an instance too large to finish quickly.
//!
//! Kept in its own test binary: the thread count of the process is only
//! stable while no other test runs beside it.

mod common;

use std::time::Duration;

use u_oncall::config::ScheduleConfig;
use u_oncall::cp::{MilpSolver, SolveStatus, SolverConfig};
use u_oncall::models::{Employee, OnCallProblem, TimeSlots};
use u_oncall::roster::{audit_schedule, OnCallCpBuilder};

use common::{assert_hard_rules, init_test};

fn large_problem() -> OnCallProblem {
    let working: Vec<usize> = (0..28).filter(|t| t % 4 == 1 || t % 4 == 2).collect();
    OnCallProblem::new(TimeSlots::new(28).with_working_hours(working)).with_employees(
        (0u32..6).map(|i| Employee::new(format!("emp{i}")).normal(i % 4).escalation((i + 1) % 3)),
    )
}

#[cfg(target_os = "linux")]
fn thread_count() -> usize {
    std::fs::read_dir("/proc/self/task")
        .map(|entries| entries.count())
        .unwrap_or(0)
}

#[cfg(not(target_os = "linux"))]
fn thread_count() -> usize {
    0
}

#[test]
fn test_limited_solves_stay_on_the_calling_thread() {
    init_test();
    let problem = large_problem();
    let config = ScheduleConfig::default()
        .with_solver(SolverConfig::default().with_time_limit(Duration::from_millis(50)));

    let before = thread_count();
    for _ in 0..4 {
        let report = OnCallCpBuilder::new(&problem)
            .with_config(config.clone())
            .solve(&MilpSolver::new())
            .unwrap();

        match report.status {
            SolveStatus::Optimal | SolveStatus::Feasible => {
                let schedule = report.schedule.as_ref().unwrap();
                assert_hard_rules(schedule, problem.slots.len());
                assert!(audit_schedule(schedule, &problem, &config).is_empty());
                assert!(report.costs.is_some());
            }
            SolveStatus::Unknown => {
                assert!(report.schedule.is_none());
                assert!(report.message.is_some());
            }
            other => panic!("unexpected status {other}"),
        }
    }
    assert_eq!(thread_count(), before);
}
