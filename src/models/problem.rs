//! Scheduling input record.
//!
//! Bundles everything a run needs: the horizon, the employees with their
//! pool memberships and targets, and the availability overrides. The
//! record is immutable once handed to the model builder.

use serde::{Deserialize, Serialize};

use super::{Availability, AvailabilityMap, Employee, EmployeeRegistry, Role, TimeSlots};

/// Input of one on-call scheduling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnCallProblem {
    /// Scheduling horizon.
    pub slots: TimeSlots,
    /// Participating employees.
    #[serde(default)]
    pub employees: EmployeeRegistry,
    /// Forced-on / forced-off overrides.
    #[serde(default)]
    pub availability: AvailabilityMap,
}

impl OnCallProblem {
    /// Creates a problem over `slots` with no employees yet.
    pub fn new(slots: TimeSlots) -> Self {
        Self {
            slots,
            employees: EmployeeRegistry::new(),
            availability: AvailabilityMap::new(),
        }
    }

    /// Adds an employee.
    pub fn with_employee(mut self, employee: Employee) -> Self {
        self.employees.add(employee);
        self
    }

    /// Adds several employees.
    pub fn with_employees(mut self, employees: impl IntoIterator<Item = Employee>) -> Self {
        for e in employees {
            self.employees.add(e);
        }
        self
    }

    /// Sets an availability override.
    pub fn with_availability(
        mut self,
        role: Role,
        employee: impl Into<String>,
        slot: usize,
        availability: Availability,
    ) -> Self {
        self.availability.set(role, employee, slot, availability);
        self
    }

    /// Forces an employee on call for a slot.
    pub fn force_on(self, role: Role, employee: impl Into<String>, slot: usize) -> Self {
        self.with_availability(role, employee, slot, Availability::ForcedOn)
    }

    /// Forces an employee off call for a slot.
    pub fn force_off(self, role: Role, employee: impl Into<String>, slot: usize) -> Self {
        self.with_availability(role, employee, slot, Availability::ForcedOff)
    }

    /// Registry indices of `role`'s pool.
    pub fn pool(&self, role: Role) -> Vec<usize> {
        self.employees.pool(role)
    }
}
