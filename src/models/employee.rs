//! Employee model and registry.
//!
//! An employee joins a role's pool by declaring a target workload for it:
//! the number of non-working-hours slots they would like to cover in that
//! role over the horizon. Membership and target travel together, so a
//! target can never exist without membership.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Role;

/// An employee who can be put on call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee identifier.
    pub id: String,
    /// Human-readable name; reports fall back to the id when empty.
    #[serde(default)]
    pub name: String,
    /// Pool memberships with their target workloads (role → target).
    #[serde(default)]
    pub roles: BTreeMap<Role, u32>,
}

impl Employee {
    /// Creates an employee that belongs to no pool yet.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            roles: BTreeMap::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Joins `role`'s pool with the given target workload.
    pub fn with_role(mut self, role: Role, target_workload: u32) -> Self {
        self.roles.insert(role, target_workload);
        self
    }

    /// Joins the normal pool.
    pub fn normal(self, target_workload: u32) -> Self {
        self.with_role(Role::Normal, target_workload)
    }

    /// Joins the escalation pool.
    pub fn escalation(self, target_workload: u32) -> Self {
        self.with_role(Role::Escalation, target_workload)
    }

    /// Name shown in reports.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Whether the employee is in `role`'s pool.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains_key(&role)
    }

    /// Whether the employee is in both pools.
    pub fn has_both_roles(&self) -> bool {
        Role::ALL.iter().all(|&r| self.has_role(r))
    }

    /// Target workload for `role`, defined iff the employee is in that pool.
    pub fn target_workload(&self, role: Role) -> Option<u32> {
        self.roles.get(&role).copied()
    }
}

/// The employees taking part in one scheduling run.
///
/// Order is significant: pools list their members in registry order, and
/// decision variables are allocated in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeRegistry {
    employees: Vec<Employee>,
}

impl EmployeeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an employee.
    pub fn add(&mut self, employee: Employee) {
        self.employees.push(employee);
    }

    /// Builder: adds an employee and returns self.
    pub fn with_employee(mut self, employee: Employee) -> Self {
        self.add(employee);
        self
    }

    /// All employees in registry order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Employee at a registry index.
    pub fn get(&self, index: usize) -> Option<&Employee> {
        self.employees.get(index)
    }

    /// Registry index of the employee with the given id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.employees.iter().position(|e| e.id == id)
    }

    /// Looks an employee up by id.
    pub fn find(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Registry indices of `role`'s pool members, in registry order.
    pub fn pool(&self, role: Role) -> Vec<usize> {
        self.employees
            .iter()
            .enumerate()
            .filter(|(_, e)| e.has_role(role))
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of employees in `role`'s pool.
    pub fn pool_size(&self, role: Role) -> usize {
        self.employees.iter().filter(|e| e.has_role(role)).count()
    }

    /// Whether the employee with `id` is in `role`'s pool.
    pub fn is_member(&self, id: &str, role: Role) -> bool {
        self.find(id).is_some_and(|e| e.has_role(role))
    }

    /// Number of employees.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

impl FromIterator<Employee> for EmployeeRegistry {
    fn from_iter<I: IntoIterator<Item = Employee>>(iter: I) -> Self {
        Self {
            employees: iter.into_iter().collect(),
        }
    }
}
