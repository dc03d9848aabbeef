//! On-call rotation scheduling as a constraint-and-objective model.
//!
//! Assigns one normal and one escalation responder to every slot of a
//! horizon, subject to availability overrides and rotation rules, and
//! balances the load with four fairness costs combined into a single
//! strictly prioritized objective.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeSlots`, `Employee`, `AvailabilityMap`,
//!   `OnCallProblem`, `OnCallSchedule`, `SolveReport`
//! - **`config`**: Run configuration (cost priority, no-repeat roles,
//!   target bound policy, solver settings)
//! - **`validation`**: Input integrity checks (duplicate IDs, pool
//!   membership, override references, target bounds)
//! - **`cp`**: Solver-neutral constraint model and the `good_lp` adapter
//! - **`roster`**: The on-call formulation: decision grid, hard rules,
//!   fairness costs, objective, projection and KPIs
//!
//! # Example
//! ```no_run
//! use u_oncall::cp::MilpSolver;
//! use u_oncall::models::{Employee, OnCallProblem, Role, TimeSlots};
//! use u_oncall::roster::OnCallCpBuilder;
//!
//! let problem = OnCallProblem::new(TimeSlots::new(6).with_working_hours([1, 2, 4]))
//!     .with_employee(Employee::new("ann").normal(1))
//!     .with_employee(Employee::new("bob").normal(1).escalation(1))
//!     .with_employee(Employee::new("cyd").escalation(1))
//!     .force_off(Role::Normal, "ann", 0);
//!
//! let report = OnCallCpBuilder::new(&problem).solve(&MilpSolver::new())?;
//! if let Some(schedule) = &report.schedule {
//!     println!("{:?}", schedule.roster(Role::Normal, 6));
//! }
//! # Ok::<(), u_oncall::roster::ScheduleError>(())
//! ```
//!
//! # References
//!
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Williams (2013), "Model Building in Mathematical Programming"

pub mod config;
pub mod cp;
pub mod models;
pub mod roster;
pub mod validation;
