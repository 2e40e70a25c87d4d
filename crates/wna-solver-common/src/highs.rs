//! HiGHS MIP backend through `good_lp`.
//!
//! Lowers a [`BinaryProgram`] to a `good_lp` model with one binary
//! variable per program variable and solves it exactly. Each call
//! rebuilds the backend model from the caller's program, so the adapter
//! carries no state between the sequential phases of a run.

use good_lp::solvers::highs::highs;
use good_lp::{variable, variables, Expression, ResolutionError, Solution as _, SolverModel};
use tracing::debug;

use crate::error::{SolverError, SolverResult};
use crate::problem::{BinaryProgram, ConstraintOp, Objective, Sense, VarId};
use crate::solution::{SolveStatus, Solution};
use crate::{Solver, SolverConfig};

/// Exact MIP solver backed by HiGHS.
#[derive(Debug, Default, Clone, Copy)]
pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        HighsSolver
    }

    fn check_ids(&self, program: &BinaryProgram, terms: &[(VarId, f64)]) -> SolverResult<()> {
        for (id, _) in terms {
            if id.index() >= program.num_vars() {
                return Err(SolverError::InvalidModel(format!(
                    "variable index {} out of range ({} variables)",
                    id.index(),
                    program.num_vars()
                )));
            }
        }
        Ok(())
    }
}

impl Solver for HighsSolver {
    fn id(&self) -> &str {
        "highs"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn solve(
        &self,
        program: &BinaryProgram,
        objective: &Objective,
        config: &SolverConfig,
    ) -> SolverResult<Solution> {
        self.check_ids(program, &objective.terms)?;
        for constraint in program.constraints() {
            self.check_ids(program, &constraint.terms)?;
        }

        debug!(
            vars = program.num_vars(),
            constraints = program.num_constraints(),
            sense = ?objective.sense,
            max_time_seconds = config.max_time_seconds,
            "lowering binary program to HiGHS"
        );

        let mut vars = variables!();
        let lp_vars: Vec<_> = (0..program.num_vars())
            .map(|_| vars.add(variable().binary()))
            .collect();

        let mut objective_expr = Expression::from(0.0);
        for (id, coeff) in &objective.terms {
            objective_expr += *coeff * lp_vars[id.index()];
        }

        let mut model = match objective.sense {
            Sense::Maximize => vars.maximise(objective_expr).using(highs),
            Sense::Minimize => vars.minimise(objective_expr).using(highs),
        };
        model.set_verbose(config.verbose);
        model = model.set_time_limit(config.max_time_seconds);
        if config.mip_gap > 0.0 {
            model = model.set_mip_rel_gap(config.mip_gap as f32).map_err(|e| {
                SolverError::InvalidModel(format!(
                    "mip gap {} rejected by backend: {:?}",
                    config.mip_gap, e
                ))
            })?;
        }

        for constraint in program.constraints() {
            let mut lhs = Expression::from(0.0);
            for (id, coeff) in &constraint.terms {
                lhs += *coeff * lp_vars[id.index()];
            }
            let lowered = match constraint.op {
                ConstraintOp::LessEq => good_lp::constraint::leq(lhs, constraint.rhs),
                ConstraintOp::Eq => good_lp::constraint::eq(lhs, constraint.rhs),
            };
            model = model.with(lowered);
        }

        match model.solve() {
            Ok(backend_solution) => {
                let values: Vec<f64> = lp_vars
                    .iter()
                    .map(|v| backend_solution.value(*v))
                    .collect();
                // Recompute the objective from our own terms rather than
                // trusting backend rounding of binary values.
                let objective_value: f64 = objective
                    .terms
                    .iter()
                    .map(|(id, coeff)| coeff * values[id.index()])
                    .sum();
                Ok(Solution {
                    status: SolveStatus::Optimal,
                    objective: objective_value,
                    values,
                })
            }
            Err(ResolutionError::Infeasible) => Ok(Solution::failed(SolveStatus::Infeasible)),
            Err(ResolutionError::Unbounded) => Ok(Solution::failed(SolveStatus::Unbounded)),
            // Time-limit exhaustion lands here as a verbatim status.
            Err(other) => Ok(Solution::failed(SolveStatus::Other(other.to_string()))),
        }
    }
}
