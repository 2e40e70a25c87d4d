//! Hierarchical (lexicographic) optimizer.
//!
//! Runs the priority classes in strict order High -> Medium -> Low.
//! Each non-empty class goes through a two-step sub-protocol against
//! the shared, append-only model:
//!
//! 1. **Maximize coverage** of the class. A non-optimal solver status
//!    here is fatal to the whole run.
//! 2. **Minimize energy** subject to that coverage: the class's
//!    connected count is pinned to the optimum just found, then the
//!    class's energy cost is minimized among the remaining ties.
//!
//! Finally every edge the class resolved to 1 is **frozen** with an
//! equality constraint, so no later, lower-priority phase can reassign
//! or bump an accepted connection. A lower class can therefore never
//! displace a higher one; it only uses whatever slack is left.
//!
//! The protocol is sequential by construction: each solver invocation
//! must complete before the next, because later phases depend on
//! constraints appended from earlier results. Cancellation is checked
//! between phases only; the external solver owns control during its
//! own call. All state is request-scoped, so a cancelled run leaves
//! nothing behind.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};
use wna_core::{validate_inputs, AccessPoint, Priority, Settings, User, WnaError, WnaResult};
use wna_solver_common::{Solution, Solver, SolverConfig};

use crate::model::AssignmentModel;
use crate::radio::RadioModel;
use crate::report::{PhaseRecord, RunReport, RunStatus};

/// Lexicographic multi-phase assignment engine.
///
/// This is the primary policy: priorities are satisfied in strict
/// order, and energy only breaks ties within a class. For the
/// single-shot weighted alternative, see [`crate::weighted`].
pub struct HierarchicalEngine<S: Solver> {
    solver: S,
    config: SolverConfig,
}

impl<S: Solver> HierarchicalEngine<S> {
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            config: SolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the full three-phase protocol for one request.
    ///
    /// Derived structures are recomputed from scratch; nothing is
    /// shared with other runs.
    pub fn optimize(
        &self,
        users: &[User],
        aps: &[AccessPoint],
        settings: &Settings,
    ) -> WnaResult<RunReport> {
        self.optimize_with_cancel(users, aps, settings, None)
    }

    /// Like [`optimize`](Self::optimize), with a cancellation flag
    /// checked between phases.
    pub fn optimize_with_cancel(
        &self,
        users: &[User],
        aps: &[AccessPoint],
        settings: &Settings,
        cancel: Option<&AtomicBool>,
    ) -> WnaResult<RunReport> {
        validate_inputs(users, aps)?;
        if !self.solver.is_available() {
            return Err(WnaError::Solver(format!(
                "backend '{}' is not available",
                self.solver.id()
            )));
        }
        check_cancel(cancel)?;

        let radio = RadioModel::derive(users, aps, settings);
        let mut model = AssignmentModel::build(&radio, users, aps);
        debug!(
            edges = model.num_edges(),
            interference_pairs = radio.interference.len(),
            max_range = radio.max_range,
            "model built"
        );

        let mut phases: Vec<PhaseRecord> = Vec::new();
        let mut last_solution: Option<Solution> = None;

        for priority in Priority::descending() {
            check_cancel(cancel)?;

            let class_total = users.iter().filter(|u| u.priority == priority).count() as u32;
            if class_total == 0 {
                continue;
            }

            let coverage_objective = model.coverage_objective(priority);
            if coverage_objective.terms.is_empty() {
                // Users exist but none has a feasible edge; trivially
                // zero coverage, nothing to pin or freeze.
                phases.push(PhaseRecord {
                    priority,
                    users_total: class_total,
                    served: 0,
                    energy: None,
                });
                continue;
            }

            // Step 1: maximize this class's connected count.
            let coverage_solution = self
                .solver
                .solve(model.program(), &coverage_objective, &self.config)
                .map_err(|e| WnaError::Solver(e.to_string()))?;
            if !coverage_solution.status.is_success() {
                info!(%priority, status = %coverage_solution.status, "coverage step failed; run aborted");
                return Ok(RunReport::failed(
                    users,
                    &radio,
                    run_status_of(&coverage_solution),
                    phases,
                ));
            }
            let coverage = coverage_solution.objective.round();

            // Step 2: pin the count, then minimize energy among ties.
            model.pin_class_coverage(priority, coverage);
            let energy_objective = model.energy_objective(priority);
            let mut energy = None;
            let phase_solution = if energy_objective.has_nonzero_terms() {
                let energy_solution = self
                    .solver
                    .solve(model.program(), &energy_objective, &self.config)
                    .map_err(|e| WnaError::Solver(e.to_string()))?;
                if !energy_solution.status.is_success() {
                    info!(%priority, status = %energy_solution.status, "energy step failed; run aborted");
                    return Ok(RunReport::failed(
                        users,
                        &radio,
                        run_status_of(&energy_solution),
                        phases,
                    ));
                }
                energy = Some(energy_solution.objective);
                energy_solution
            } else {
                coverage_solution
            };

            // Step 3: freeze every edge this class resolved to 1.
            for edge in model.class_edges(priority) {
                if phase_solution.is_one(model.edge_var(edge)) {
                    model.freeze_edge(edge);
                }
            }

            info!(
                %priority,
                served = coverage as u32,
                total = class_total,
                frozen = model.frozen_count(),
                "phase complete"
            );
            phases.push(PhaseRecord {
                priority,
                users_total: class_total,
                served: coverage as u32,
                energy,
            });
            last_solution = Some(phase_solution);
        }

        Ok(RunReport::from_solution(
            users,
            aps,
            &radio,
            &model,
            last_solution.as_ref(),
            phases,
        ))
    }
}

fn check_cancel(cancel: Option<&AtomicBool>) -> WnaResult<()> {
    if cancel.is_some_and(|c| c.load(Ordering::Relaxed)) {
        return Err(WnaError::Cancelled);
    }
    Ok(())
}

fn run_status_of(solution: &Solution) -> RunStatus {
    use wna_solver_common::SolveStatus;
    match &solution.status {
        SolveStatus::Infeasible => RunStatus::Infeasible,
        other => RunStatus::Solver(other.to_string()),
    }
}
