//! Error types for solver adapters.
//!
//! Model infeasibility is not an error here: it is a [`crate::SolveStatus`]
//! on the returned solution. `SolverError` covers the adapter itself
//! failing to produce any status at all.

use thiserror::Error;

/// Errors that can occur inside a solver adapter.
#[derive(Debug, Error)]
pub enum SolverError {
    /// The backend is not usable in this build/environment.
    #[error("Solver backend '{0}' is not available")]
    Unavailable(String),

    /// The model references variables the adapter cannot resolve.
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// The backend failed while solving.
    #[error("Backend failure: {0}")]
    Backend(String),
}

/// Result type alias for solver operations.
pub type SolverResult<T> = Result<T, SolverError>;
