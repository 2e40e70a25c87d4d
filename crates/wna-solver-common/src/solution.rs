//! Solution representation for the solver boundary.

use serde::{Deserialize, Serialize};

use crate::problem::VarId;

/// Status of a solve call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// Optimal solution found.
    Optimal,
    /// Problem is infeasible.
    Infeasible,
    /// Problem is unbounded.
    Unbounded,
    /// Any other backend-reported status, surfaced verbatim.
    Other(String),
}

impl SolveStatus {
    /// Check if this status represents a successful solve.
    pub fn is_success(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "optimal"),
            SolveStatus::Infeasible => write!(f, "infeasible"),
            SolveStatus::Unbounded => write!(f, "unbounded"),
            SolveStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Result of one solve call.
///
/// `values` is dense, indexed by [`VarId`]; it is empty when the status
/// is not [`SolveStatus::Optimal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub status: SolveStatus,
    /// Objective value at the returned point (0.0 on failure).
    pub objective: f64,
    pub values: Vec<f64>,
}

impl Solution {
    /// A failed solve carrying only its status.
    pub fn failed(status: SolveStatus) -> Self {
        Solution {
            status,
            objective: 0.0,
            values: Vec::new(),
        }
    }

    /// Value of a variable, when the solve produced one. `None` on a
    /// failed solution (whose `values` is empty) and for ids outside
    /// the solved program.
    pub fn value(&self, id: VarId) -> Option<f64> {
        self.values.get(id.index()).copied()
    }

    /// Whether a binary variable resolved to 1. MIP backends can return
    /// values a hair off the integer point, so threshold at 0.5.
    /// Always false on a failed solution.
    pub fn is_one(&self, id: VarId) -> bool {
        self.value(id).is_some_and(|v| v > 0.5)
    }
}
