//! A finite-domain constraint satisfaction problem solver.
//!
//! Build a [`csp_graph::ConstraintGraph`] from [`variable::Variable`]s and
//! [`constraint::Constraint`]s, call `preprocess()`, then drive the search
//! with [`solver::Csp`]'s `solve_dfs`, `solve_fc`, or `solve_arc`.

pub mod constraint;
pub mod csp_graph;
pub mod error;
pub mod problems;
pub mod solver;
pub mod value;
pub mod variable;

pub use constraint::{Constraint, ConstraintId};
pub use csp_graph::ConstraintGraph;
pub use error::{CspError, CspResult};
pub use solver::Csp;
pub use value::Value;
pub use variable::{VarId, Variable};
