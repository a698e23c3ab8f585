//! Error kinds shared by the variable, constraint, and graph layers.

use thiserror::Error;

/// Everything that can go wrong while building or driving a [`crate::csp_graph::ConstraintGraph`].
///
/// All four variants are caller errors: the engine never raises one mid-search,
/// it only ever reports infeasibility by returning `false`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CspError {
    /// A constraint referenced a variable name that was never inserted into the graph.
    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    /// `remove_value` on a value absent from the domain, or `assign()` /
    /// `get_min_value` / `get_max_value` on an empty domain.
    #[error("domain error: {0}")]
    DomainError(String),

    /// `unassign` on an already-unassigned variable, or `get_value` on an
    /// unassigned one.
    #[error("state error: {0}")]
    StateError(String),

    /// A variable name was inserted twice into the same graph.
    #[error("duplicate variable name: {0}")]
    DuplicateName(String),
}

/// Convenience alias used throughout the crate.
pub type CspResult<T> = Result<T, CspError>;
