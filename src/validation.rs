//! Input validation for on-call scheduling problems.
//!
//! Checks structural integrity of the horizon, employees and availability
//! overrides before a model is built. Detects:
//! - Empty horizons and working-hours indices outside the horizon
//! - Duplicate employee IDs and employees in no pool
//! - Empty role pools
//! - Overrides naming unknown employees, non-members or slots outside the horizon
//! - Two employees forced on for the same slot and role
//! - Target workloads above their bound
//!
//! Problems the solver alone can detect (a slot where every pool member is
//! forced off, a pool too small for the no-repeat rule) are not reported
//! here; they surface as an infeasible solve.

use std::collections::HashSet;

use thiserror::Error;
use tracing::warn;

use crate::config::TargetBoundPolicy;
use crate::models::{OnCallProblem, Role};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Path of the offending input field.
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The horizon has no slots.
    EmptyHorizon,
    /// A slot index lies outside the horizon.
    SlotOutOfRange,
    /// Two employees share the same ID.
    DuplicateId,
    /// An employee belongs to neither pool.
    NoPoolMembership,
    /// A role has no pool members.
    EmptyPool,
    /// An override references an employee that doesn't exist.
    UnknownEmployee,
    /// An override references an employee outside the role's pool.
    NotInPool,
    /// Two employees are forced on for the same slot and role.
    ConflictingForcedOn,
    /// A target workload exceeds its bound.
    TargetExceedsBound,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Upper bound on a normal target: half the non-working slots, since the
/// no-repeat rule keeps anyone from covering two slots in a row.
pub fn normal_target_bound(non_working: usize) -> u32 {
    (non_working / 2) as u32
}

/// Upper bound on an escalation target: the non-working slots minus the
/// slots the employee is forced off in the escalation role.
pub fn escalation_target_bound(non_working: usize, forced_off: usize) -> u32 {
    non_working.saturating_sub(forced_off) as u32
}

/// Validates an on-call problem.
///
/// Checks:
/// 1. The horizon is non-empty and every working-hours index lies in it
/// 2. Employee IDs are unique
/// 3. Every employee belongs to at least one pool
/// 4. Both pools are non-empty
/// 5. Every override names a known pool member and an in-range slot
/// 6. No slot has two employees forced on in the same role
/// 7. Targets respect [`normal_target_bound`] / [`escalation_target_bound`]
///    (reported only under [`TargetBoundPolicy::Reject`], logged otherwise)
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(problem: &OnCallProblem, policy: TargetBoundPolicy) -> ValidationResult {
    let mut errors = Vec::new();
    let slots = &problem.slots;

    if slots.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyHorizon,
            "slots.slot_count",
            "The horizon must contain at least one slot",
        ));
    }
    for t in slots.out_of_range_working_hours() {
        errors.push(ValidationError::new(
            ValidationErrorKind::SlotOutOfRange,
            format!("slots.working_hours[{t}]"),
            format!("Working-hours slot {t} is outside 0..{}", slots.len()),
        ));
    }

    // Employees
    let mut ids = HashSet::new();
    for (i, e) in problem.employees.employees().iter().enumerate() {
        if !ids.insert(e.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("employees[{i}].id"),
                format!("Duplicate employee ID: {}", e.id),
            ));
        }
        if e.roles.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoPoolMembership,
                format!("employees[{i}].roles"),
                format!("Employee '{}' belongs to neither pool", e.id),
            ));
        }
    }
    if !slots.is_empty() {
        for role in Role::ALL {
            if problem.employees.pool_size(role) == 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyPool,
                    format!("employees.roles.{role}"),
                    format!("No employee can cover the {role} role"),
                ));
            }
        }
    }

    // Availability overrides
    for (key, _) in problem.availability.iter() {
        let field = format!("availability[{}/{}/{}]", key.role, key.employee, key.slot);
        match problem.employees.find(&key.employee) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::UnknownEmployee,
                field.clone(),
                format!("Override references unknown employee '{}'", key.employee),
            )),
            Some(e) if !e.has_role(key.role) => errors.push(ValidationError::new(
                ValidationErrorKind::NotInPool,
                field.clone(),
                format!(
                    "Employee '{}' is not in the {} pool",
                    key.employee, key.role
                ),
            )),
            Some(_) => {}
        }
        if !slots.contains(key.slot) {
            errors.push(ValidationError::new(
                ValidationErrorKind::SlotOutOfRange,
                field,
                format!("Slot {} is outside 0..{}", key.slot, slots.len()),
            ));
        }
    }
    for role in Role::ALL {
        for t in slots.iter() {
            let forced = problem.availability.forced_on_at(role, t);
            if forced.len() > 1 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::ConflictingForcedOn,
                    format!("availability[{role}/*/{t}]"),
                    format!(
                        "Employees {} are all forced on as {role} for slot {t}",
                        forced.join(", ")
                    ),
                ));
            }
        }
    }

    check_target_bounds(problem, policy, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_target_bounds(
    problem: &OnCallProblem,
    policy: TargetBoundPolicy,
    errors: &mut Vec<ValidationError>,
) {
    let non_working = problem.slots.non_working_slots().len();

    for (i, e) in problem.employees.employees().iter().enumerate() {
        for (&role, &target) in &e.roles {
            let bound = match role {
                Role::Normal => normal_target_bound(non_working),
                Role::Escalation => escalation_target_bound(
                    non_working,
                    problem.availability.forced_off_count(role, &e.id),
                ),
            };
            if target <= bound {
                continue;
            }
            let field = format!("employees[{i}].roles.{role}");
            match policy {
                TargetBoundPolicy::Reject => errors.push(ValidationError::new(
                    ValidationErrorKind::TargetExceedsBound,
                    field,
                    format!(
                        "Target {target} for '{}' as {role} exceeds the bound of {bound}",
                        e.id
                    ),
                )),
                TargetBoundPolicy::Warn => warn!(
                    employee = %e.id,
                    %role,
                    target,
                    bound,
                    "target workload exceeds its bound; fairness objective may be misleading"
                ),
            }
        }
    }
}
