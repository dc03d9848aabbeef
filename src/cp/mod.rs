//! Solver-neutral constraint programming layer.
//!
//! Domain code builds a [`CpModel`] out of boolean and bounded integer
//! variables, linear constraints, implications and max-equalities, then
//! hands it to any [`CpSolver`]. The crate ships [`MilpSolver`], an exact
//! adapter over `good_lp`; other engines plug in by implementing the trait.
//!
//! # Reference
//! - Rossi, van Beek & Walsh (2006), "Handbook of Constraint Programming"
//! - Williams (2013), "Model Building in Mathematical Programming"

mod expr;
mod milp;
mod model;
mod solver;

pub use expr::{BoolVar, Comparison, IntVar, LinearExpr, Literal, VarId};
pub use milp::MilpSolver;
pub use model::{CpConstraint, CpModel, Domain, VarInfo};
pub use solver::{CpSolution, CpSolver, SolveStatus, SolverConfig};
