//! On-call scheduling domain models.
//!
//! Provides the data types for describing an on-call rotation problem
//! (horizon, employees, availability) and its solution (schedule, costs).
//!
//! # Domain Mappings
//!
//! | u-oncall | Operations | Healthcare | Support desk |
//! |----------|-----------|------------|--------------|
//! | Slot | Night / weekend | Shift | Business day |
//! | Normal role | Primary pager | Attending | First line |
//! | Escalation role | Secondary pager | Consultant | Second line |
//! | Target workload | Requested nights | Requested shifts | Requested days |

mod availability;
mod employee;
mod problem;
mod role;
mod schedule;
mod slot;

pub use availability::{Availability, AvailabilityEntry, AvailabilityKey, AvailabilityMap};
pub use employee::{Employee, EmployeeRegistry};
pub use problem::OnCallProblem;
pub use role::Role;
pub use schedule::{
    CostBreakdown, CostKind, CostValue, OnCallAssignment, OnCallSchedule, SolveReport,
};
pub use slot::TimeSlots;
