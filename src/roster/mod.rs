//! On-call rotation formulation.
//!
//! Turns an [`OnCallProblem`] into a [`CpModel`]: one boolean per
//! (employee, slot, role), the hard rules in [`hard`], the four fairness
//! costs in [`fairness`] combined by [`objective`], and reads solutions back
//! through [`projector`].
//!
//! Every run gets its own model; nothing is shared between runs.
//!
//! # Reference
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"

pub mod audit;
pub mod fairness;
pub mod grid;
pub mod hard;
pub mod kpi;
pub mod objective;
pub mod projector;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::ScheduleConfig;
use crate::cp::{CpModel, CpSolution, CpSolver};
use crate::models::{CostKind, OnCallProblem, Role, SolveReport};
use crate::validation::{validate_problem, ValidationError};

pub use audit::{audit_schedule, RuleKind, RuleViolation};
pub use fairness::CostTerm;
pub use grid::{AssignmentGrid, AssignmentGrids};
pub use kpi::{EmployeeWorkload, FairnessKpi};
pub use objective::{lexicographic_weights, Objective, ObjectiveComposer, WeightedTerm};

/// Failures that stop a run before the solver is called.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The input failed validation.
    #[error("invalid problem: {} validation error(s), first: {}", .0.len(), first_error(.0))]
    Validation(Vec<ValidationError>),
    /// A cost term is absent from the priority order.
    #[error("cost {0} is missing from the priority order")]
    MissingCost(CostKind),
    /// A cost term appears twice in the priority order.
    #[error("cost {0} appears more than once in the priority order")]
    DuplicateCost(CostKind),
    /// The objective weights do not fit in 64-bit integers.
    #[error("objective weights overflow i64")]
    ObjectiveOverflow,
}

fn first_error(errors: &[ValidationError]) -> String {
    errors.first().map(ToString::to_string).unwrap_or_default()
}

impl From<Vec<ValidationError>> for ScheduleError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}

/// A built model and the handles needed to read its solutions.
#[derive(Debug, Clone)]
pub struct OnCallModel {
    pub model: CpModel,
    pub grids: AssignmentGrids,
    pub objective: Objective,
}

impl OnCallModel {
    /// Reads `solution` back into a report.
    pub fn project(&self, problem: &OnCallProblem, solution: CpSolution) -> SolveReport {
        projector::project(problem, &self.grids, &self.objective, solution)
    }
}

/// Builds and solves the on-call model of one problem.
///
/// # Example
/// ```no_run
/// use u_oncall::cp::MilpSolver;
/// use u_oncall::models::{Employee, OnCallProblem, TimeSlots};
/// use u_oncall::roster::OnCallCpBuilder;
///
/// let problem = OnCallProblem::new(TimeSlots::new(4).with_working_hours([1, 2]))
///     .with_employee(Employee::new("ann").normal(1))
///     .with_employee(Employee::new("bob").normal(1).escalation(0))
///     .with_employee(Employee::new("cyd").escalation(2));
/// let report = OnCallCpBuilder::new(&problem).solve(&MilpSolver::new())?;
/// # Ok::<(), u_oncall::roster::ScheduleError>(())
/// ```
pub struct OnCallCpBuilder<'a> {
    problem: &'a OnCallProblem,
    config: ScheduleConfig,
}

impl<'a> OnCallCpBuilder<'a> {
    /// Creates a builder with the default configuration.
    pub fn new(problem: &'a OnCallProblem) -> Self {
        Self {
            problem,
            config: ScheduleConfig::default(),
        }
    }

    /// Sets the run configuration.
    pub fn with_config(mut self, config: ScheduleConfig) -> Self {
        self.config = config;
        self
    }

    /// The run configuration.
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Validates the problem and builds its model.
    ///
    /// Creates:
    /// - A decision `BoolVar` per (pool member, slot) and role
    /// - Availability, coverage, no-self-escalation and no-repeat rules
    /// - Rotation and target costs per role
    /// - The big-M objective over the configured priority order
    pub fn build(&self) -> Result<OnCallModel, ScheduleError> {
        validate_problem(self.problem, self.config.target_bound_policy)?;

        let mut model = CpModel::new("on-call");
        let grids = AssignmentGrids::allocate(&mut model, self.problem);
        hard::add_hard_constraints(&mut model, self.problem, &grids, &self.config);

        let mut terms = Vec::with_capacity(4);
        for role in Role::ALL {
            terms.push(fairness::rotation_cost(&mut model, self.problem, grids.get(role)));
            terms.push(fairness::target_cost(&mut model, self.problem, grids.get(role)));
        }

        let objective = ObjectiveComposer::new(self.config.priority.clone()).compose(terms)?;
        for t in &objective.terms {
            debug!(cost = %t.term.kind, upper_bound = t.term.upper_bound, weight = t.weight, "objective term");
        }
        model.minimize(objective.expr.clone());

        info!(
            slots = self.problem.slots.len(),
            normal_pool = grids.normal.pool_size(),
            escalation_pool = grids.escalation.pool_size(),
            variables = model.var_count(),
            constraints = model.constraint_count(),
            "on-call model built"
        );

        Ok(OnCallModel {
            model,
            grids,
            objective,
        })
    }

    /// Builds the model, solves it and projects the result.
    ///
    /// Infeasibility, timeouts and solver errors are reported through the
    /// status of the returned report, not as `Err`.
    pub fn solve<S: CpSolver>(&self, solver: &S) -> Result<SolveReport, ScheduleError> {
        let built = self.build()?;

        info!(solver = solver.name(), "solving on-call model");
        let solution = solver.solve(&built.model, &self.config.solver);
        let report = built.project(self.problem, solution);

        info!(
            status = %report.status,
            objective = report.costs.as_ref().map(|c| c.weighted_total),
            "on-call solve finished"
        );
        Ok(report)
    }
}
