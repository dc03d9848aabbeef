//! Configuration of a scheduling run.
//!
//! Everything here has a default that reproduces the reference behavior:
//! the cost order escalation rotation, normal rotation, escalation target,
//! normal target (see [`crate::roster::objective`] for how the order maps
//! to weights), the no-immediate-repeat rule on the normal role only, and
//! target workloads above their bound rejected as configuration errors.

use serde::{Deserialize, Serialize};

use crate::cp::SolverConfig;
use crate::models::{CostKind, Role};

/// What to do with a target workload that exceeds its documented bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetBoundPolicy {
    /// Report a validation error.
    #[default]
    Reject,
    /// Log a warning and schedule anyway.
    Warn,
}

/// Settings of one scheduling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Cost terms in objective order. Weights grow along the list: the last
    /// entry weighs most and the first least. Must list each of the four
    /// terms exactly once.
    pub priority: Vec<CostKind>,
    /// Roles subject to the no-immediate-repeat rule.
    pub no_repeat_roles: Vec<Role>,
    /// Handling of target workloads above their bound.
    pub target_bound_policy: TargetBoundPolicy,
    /// Settings forwarded to the solver.
    pub solver: SolverConfig,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            priority: CostKind::DEFAULT_PRIORITY.to_vec(),
            no_repeat_roles: vec![Role::Normal],
            target_bound_policy: TargetBoundPolicy::Reject,
            solver: SolverConfig::default(),
        }
    }
}

impl ScheduleConfig {
    /// Sets the cost order; the last entry weighs most.
    pub fn with_priority(mut self, priority: Vec<CostKind>) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the roles subject to the no-immediate-repeat rule.
    pub fn with_no_repeat_roles(mut self, roles: Vec<Role>) -> Self {
        self.no_repeat_roles = roles;
        self
    }

    /// Sets the target bound policy.
    pub fn with_target_bound_policy(mut self, policy: TargetBoundPolicy) -> Self {
        self.target_bound_policy = policy;
        self
    }

    /// Sets the solver settings.
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Whether `role` is subject to the no-immediate-repeat rule.
    pub fn forbids_repeat(&self, role: Role) -> bool {
        self.no_repeat_roles.contains(&role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config = ScheduleConfig::default();
        assert_eq!(config.priority[0], CostKind::RotationEscalation);
        assert_eq!(config.priority[3], CostKind::TargetNormal);
        assert!(config.forbids_repeat(Role::Normal));
        assert!(!config.forbids_repeat(Role::Escalation));
        assert_eq!(config.target_bound_policy, TargetBoundPolicy::Reject);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ScheduleConfig =
            serde_json::from_str(r#"{ "target_bound_policy": "warn" }"#).unwrap();
        assert_eq!(config.target_bound_policy, TargetBoundPolicy::Warn);
        assert_eq!(config.no_repeat_roles, vec![Role::Normal]);
    }

    #[test]
    fn test_builders() {
        let config = ScheduleConfig::default()
            .with_no_repeat_roles(vec![Role::Normal, Role::Escalation])
            .with_solver(SolverConfig::default().with_time_limit(Duration::from_secs(1)));
        assert!(config.forbids_repeat(Role::Escalation));
        assert_eq!(config.solver.time_limit, Some(Duration::from_secs(1)));
    }
}
