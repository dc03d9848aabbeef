//! Hard-rule audit of a finished schedule.
//!
//! Re-checks coverage, availability, self-escalation and repeats directly
//! on an [`OnCallSchedule`], independent of any solver. Useful for
//! schedules edited by hand after solving.

use serde::Serialize;
use thiserror::Error;

use crate::config::ScheduleConfig;
use crate::models::{Availability, OnCallProblem, OnCallSchedule, Role};

/// Broken rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Not exactly one employee on call.
    Coverage,
    /// Employee on call in a role they do not hold.
    NotInPool,
    /// Forced-on employee not on call.
    ForcedOn,
    /// Forced-off employee on call.
    ForcedOff,
    /// Same employee normal and escalation in one slot.
    SelfEscalation,
    /// Same employee on call in consecutive slots.
    Repeat,
}

/// One broken rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("slot {slot}, {role}: {message}")]
pub struct RuleViolation {
    pub kind: RuleKind,
    pub slot: usize,
    pub role: Role,
    pub message: String,
}

impl RuleViolation {
    fn new(kind: RuleKind, slot: usize, role: Role, message: impl Into<String>) -> Self {
        Self {
            kind,
            slot,
            role,
            message: message.into(),
        }
    }
}

/// Lists every hard rule `schedule` breaks. Empty means the schedule is
/// feasible for `problem` under `config`.
pub fn audit_schedule(
    schedule: &OnCallSchedule,
    problem: &OnCallProblem,
    config: &ScheduleConfig,
) -> Vec<RuleViolation> {
    let mut violations = Vec::new();

    for t in problem.slots.iter() {
        for role in Role::ALL {
            let on_call = schedule.all_on_call(role, t);
            if on_call.len() != 1 {
                violations.push(RuleViolation::new(
                    RuleKind::Coverage,
                    t,
                    role,
                    format!("{} employees on call", on_call.len()),
                ));
            }
            for id in on_call {
                if !problem.employees.is_member(id, role) {
                    violations.push(RuleViolation::new(
                        RuleKind::NotInPool,
                        t,
                        role,
                        format!("'{id}' is not in the pool"),
                    ));
                }
            }
        }

        for id in schedule.all_on_call(Role::Normal, t) {
            if schedule.all_on_call(Role::Escalation, t).contains(&id) {
                violations.push(RuleViolation::new(
                    RuleKind::SelfEscalation,
                    t,
                    Role::Escalation,
                    format!("'{id}' escalates to themselves"),
                ));
            }
        }
    }

    for (key, availability) in problem.availability.iter() {
        let on_call = schedule
            .all_on_call(key.role, key.slot)
            .contains(&key.employee.as_str());
        let kind = match availability {
            Availability::ForcedOn if !on_call => RuleKind::ForcedOn,
            Availability::ForcedOff if on_call => RuleKind::ForcedOff,
            _ => continue,
        };
        violations.push(RuleViolation::new(
            kind,
            key.slot,
            key.role,
            format!("'{}' ignores availability override", key.employee),
        ));
    }

    for role in Role::ALL.into_iter().filter(|&r| config.forbids_repeat(r)) {
        for (t, next) in problem.slots.consecutive_pairs() {
            let following = schedule.all_on_call(role, next);
            for id in schedule.all_on_call(role, t) {
                if following.contains(&id) {
                    violations.push(RuleViolation::new(
                        RuleKind::Repeat,
                        next,
                        role,
                        format!("'{id}' repeats slot {t}"),
                    ));
                }
            }
        }
    }

    violations
}
