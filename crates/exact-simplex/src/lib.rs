//! Tableau simplex method over exact rational arithmetic.
//!
//! A [`Problem`] is canonicalized into a [`Tableau`], pivoted until the
//! selection rules stop, and the final assignment is re-checked against the
//! original constraints. Every intermediate tableau is kept in a
//! [`StepTrace`] for stepwise display.

mod error;
mod problem;
mod rational;
mod simplex;
mod solution;
mod tableau;
mod trace;
pub mod validate;

pub use error::SolverError;
pub use problem::{Constraint, Objective, Problem, Relation, Sense, Variable, coefficients};
pub use rational::Rational;
pub use simplex::{Decision, Run, Solver, select_pivot, solve};
pub use solution::{ConstraintViolation, Notice, Solution, SolutionStatus};
pub use tableau::{Canonical, Tableau};
pub use trace::{PivotPosition, Step, StepCursor, StepTrace};
