//! Common types and the solver adapter boundary for wna.
//!
//! This crate defines the binary decision model exchanged between the
//! assignment engine and an external combinatorial solver, and the
//! [`Solver`] trait that adapters implement. The engine never inspects
//! a solver's search algorithm; it issues sequential
//! `solve(program, objective)` calls over a growing, append-only model
//! and interprets the returned status and variable values.
//!
//! # Architecture
//!
//! ```text
//! wna-algo ──BinaryProgram + Objective──> Solver backend
//!          <──Solution {status, values}──
//! ```
//!
//! # Backends
//!
//! | Backend | Problem Type | Feature |
//! |---------|--------------|---------|
//! | HiGHS (via good_lp) | MIP | `solver-highs` (default) |
//!
//! The assignment model is a genuine binary program (co-channel
//! interference constraints break integrality of the LP relaxation),
//! so the shipped backend is an exact MIP solver.

pub mod error;
pub mod problem;
pub mod solution;

#[cfg(feature = "solver-highs")]
pub mod highs;

pub use error::{SolverError, SolverResult};
pub use problem::{BinaryProgram, Constraint, ConstraintOp, Objective, Sense, VarId};
pub use solution::{SolveStatus, Solution};

#[cfg(feature = "solver-highs")]
pub use highs::HighsSolver;

/// Configuration passed to solver backends.
///
/// Timeouts on individual solver calls live here, not in the
/// orchestration logic; backends apply whichever knobs they support.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum solve time (seconds)
    pub max_time_seconds: f64,
    /// MIP optimality gap tolerance
    pub mip_gap: f64,
    /// Whether to enable verbose solver output
    pub verbose: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_time_seconds: 300.0, // 5 minutes
            mip_gap: 1e-6,
            verbose: false,
        }
    }
}

/// A solver capability that accepts a binary decision model and returns
/// an assignment of variable values.
///
/// Implementations must be stateless across calls: each invocation
/// receives the full current model, so a caller can extend the program
/// between calls without the backend carrying state.
pub trait Solver: Send + Sync {
    /// Unique identifier (e.g., "highs")
    fn id(&self) -> &str;

    /// Check if this backend is usable at runtime
    fn is_available(&self) -> bool;

    /// Solve the program under the given objective.
    ///
    /// Infeasibility is not an `Err`: it comes back as a [`Solution`]
    /// with [`SolveStatus::Infeasible`] so the caller can distinguish
    /// model infeasibility from adapter failures.
    fn solve(
        &self,
        program: &BinaryProgram,
        objective: &Objective,
        config: &SolverConfig,
    ) -> SolverResult<Solution>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that the trait is object-safe (can be used with dyn).
    #[test]
    fn test_solver_trait_is_object_safe() {
        fn _accepts_solver(_s: &dyn Solver) {}
    }

    #[test]
    fn test_solver_trait_is_send_sync() {
        fn _assert_send<T: Send + ?Sized>() {}
        fn _assert_sync<T: Sync + ?Sized>() {}

        _assert_send::<Box<dyn Solver>>();
        _assert_sync::<Box<dyn Solver>>();
    }

    #[test]
    fn test_solver_config_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.max_time_seconds, 300.0);
        assert!(!config.verbose);
    }
}
