//! Error types for routing calculations.

use thiserror::Error;

/// Errors raised while building or solving a routing problem.
///
/// An unsatisfiable problem is not an error: it is reported as
/// [`CalculationOutcome::Infeasible`](crate::models::CalculationOutcome::Infeasible).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RoutingError {
    /// The location set or vehicle count is malformed. Raised before any
    /// solver is invoked.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The solver cannot run for this problem or configuration.
    #[error("solver unavailable: {0}")]
    SolverUnavailable(String),

    /// The solver returned routes that do not describe a valid assignment.
    #[error("invalid solver output: {0}")]
    InvalidSolution(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RoutingError>;
