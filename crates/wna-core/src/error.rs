//! Unified error types for the wna ecosystem
//!
//! This module provides a common error type [`WnaError`] that can represent
//! errors from any part of the system. Domain-specific error types can be
//! converted to `WnaError` for uniform error handling at API boundaries.
//!
//! # Example
//!
//! ```ignore
//! use wna_core::{WnaError, WnaResult};
//!
//! fn run(users: &[User], aps: &[AccessPoint]) -> WnaResult<()> {
//!     validate_inputs(users, aps)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Unified error type for all wna operations.
#[derive(Error, Debug)]
pub enum WnaError {
    /// Input validation errors (duplicate names, bad capacities, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Solver/adapter errors
    #[error("Solver error: {0}")]
    Solver(String),

    /// The run was cancelled between phases
    #[error("Run cancelled")]
    Cancelled,

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using WnaError.
pub type WnaResult<T> = Result<T, WnaError>;

// Conversion from anyhow::Error
impl From<anyhow::Error> for WnaError {
    fn from(err: anyhow::Error) -> Self {
        WnaError::Other(err.to_string())
    }
}

// Conversion from string-like types for convenience
impl From<String> for WnaError {
    fn from(s: String) -> Self {
        WnaError::Other(s)
    }
}

impl From<&str> for WnaError {
    fn from(s: &str) -> Self {
        WnaError::Other(s.to_string())
    }
}
