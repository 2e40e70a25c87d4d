//! Single-shot combined-weighted policy (explicit alternative).
//!
//! Maximizes `sum(w(u) * x) - lambda * sum(c * x)` over all feasible
//! edges in one solve, where `w` is the priority weight (High=3,
//! Medium=2, Low=1) and `c` the energy cost.
//!
//! This is **not** equivalent to the lexicographic protocol in
//! [`crate::hierarchical`]: a lower-priority class can outcompete a
//! higher one whenever its aggregate weight advantage exceeds the
//! energy penalty (e.g., one High user may be dropped to admit several
//! Low users). Choosing this engine is a policy decision the caller
//! makes by constructing it explicitly; nothing selects it by default.

use tracing::info;
use wna_core::{validate_inputs, AccessPoint, Settings, User, WnaError, WnaResult};
use wna_solver_common::{Objective, Solver, SolverConfig, VarId};

use crate::model::AssignmentModel;
use crate::radio::RadioModel;
use crate::report::{RunReport, RunStatus};

/// Combined priority-weight / energy-penalty engine.
pub struct WeightedEngine<S: Solver> {
    solver: S,
    config: SolverConfig,
    /// Energy penalty multiplier. Higher values trade served users for
    /// cheaper assignments.
    lambda: f64,
}

impl<S: Solver> WeightedEngine<S> {
    pub fn new(solver: S, lambda: f64) -> Self {
        Self {
            solver,
            config: SolverConfig::default(),
            lambda,
        }
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Solve the combined objective in a single pass.
    pub fn optimize(
        &self,
        users: &[User],
        aps: &[AccessPoint],
        settings: &Settings,
    ) -> WnaResult<RunReport> {
        validate_inputs(users, aps)?;
        if !self.solver.is_available() {
            return Err(WnaError::Solver(format!(
                "backend '{}' is not available",
                self.solver.id()
            )));
        }

        let radio = RadioModel::derive(users, aps, settings);
        let model = AssignmentModel::build(&radio, users, aps);

        if model.num_edges() == 0 {
            return Ok(RunReport::from_solution(
                users, aps, &radio, &model, None, Vec::new(),
            ));
        }

        let terms: Vec<(VarId, f64)> = (0..model.num_edges())
            .map(|edge| {
                let (u_idx, _) = model.edge_endpoints(edge);
                let weight = f64::from(users[u_idx].priority.weight());
                let cost = radio.edges[edge].cost;
                (model.edge_var(edge), weight - self.lambda * cost)
            })
            .collect();
        let objective = Objective::maximize(terms);

        let solution = self
            .solver
            .solve(model.program(), &objective, &self.config)
            .map_err(|e| WnaError::Solver(e.to_string()))?;
        if !solution.status.is_success() {
            use wna_solver_common::SolveStatus;
            let status = match &solution.status {
                SolveStatus::Infeasible => RunStatus::Infeasible,
                other => RunStatus::Solver(other.to_string()),
            };
            return Ok(RunReport::failed(users, &radio, status, Vec::new()));
        }

        info!(objective = solution.objective, lambda = self.lambda, "weighted solve complete");
        Ok(RunReport::from_solution(
            users,
            aps,
            &radio,
            &model,
            Some(&solution),
            Vec::new(),
        ))
    }
}
