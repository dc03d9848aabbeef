//! Shared helpers for integration tests.

#![allow(dead_code)]

use tracing_subscriber::{fmt, EnvFilter};
use u_oncall::models::{Employee, OnCallProblem, OnCallSchedule, Role, TimeSlots};

/// Installs a test-writer subscriber once per binary. `RUST_LOG` overrides
/// the default `info` level.
pub fn init_test() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
}

/// 16 slots, working hours `{1, 2, 5, 6, 9, 10, 13, 14}`, four normal
/// responders without targets, three escalation responders wanting two
/// non-working slots each, and escalation pinned to emp2 for slots 0..3.
pub fn reference_problem() -> OnCallProblem {
    OnCallProblem::new(TimeSlots::new(16).with_working_hours([1, 2, 5, 6, 9, 10, 13, 14]))
        .with_employees([
            Employee::new("emp0").normal(0).escalation(2),
            Employee::new("emp1").normal(0).escalation(2),
            Employee::new("emp2").normal(0).escalation(2),
            Employee::new("emp3").normal(0),
        ])
        .force_off(Role::Normal, "emp1", 0)
        .force_off(Role::Normal, "emp2", 0)
        .force_on(Role::Escalation, "emp2", 0)
        .force_off(Role::Escalation, "emp0", 1)
        .force_off(Role::Escalation, "emp1", 1)
        .force_off(Role::Escalation, "emp0", 2)
        .force_off(Role::Escalation, "emp1", 2)
}

/// Asserts the hard rules every solved schedule must satisfy.
pub fn assert_hard_rules(schedule: &OnCallSchedule, slot_count: usize) {
    for t in 0..slot_count {
        let normal = schedule.all_on_call(Role::Normal, t);
        let escalation = schedule.all_on_call(Role::Escalation, t);
        assert_eq!(normal.len(), 1, "slot {t}: normal coverage {normal:?}");
        assert_eq!(escalation.len(), 1, "slot {t}: escalation coverage {escalation:?}");
        assert_ne!(normal[0], escalation[0], "slot {t}: self-escalation");
        if t + 1 < slot_count {
            assert_ne!(
                Some(normal[0]),
                schedule.on_call(Role::Normal, t + 1),
                "slots {t}, {}: normal repeat",
                t + 1
            );
        }
    }
}
