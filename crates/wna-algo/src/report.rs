//! Run results: assignment map, status, and display diagnostics.

use std::collections::BTreeMap;

use serde::Serialize;
use wna_core::{AccessPoint, Priority, User};
use wna_solver_common::Solution;

use crate::model::AssignmentModel;
use crate::radio::RadioModel;

/// Final status of one optimization run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RunStatus {
    /// Every invoked phase solved to optimality.
    Optimal,
    /// Some phase's solver call reported infeasibility.
    Infeasible,
    /// Any other solver status, surfaced verbatim.
    Solver(String),
}

impl RunStatus {
    pub fn is_optimal(&self) -> bool {
        matches!(self, RunStatus::Optimal)
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Optimal => write!(f, "Optimal"),
            RunStatus::Infeasible => write!(f, "Infeasible"),
            RunStatus::Solver(s) => write!(f, "Solver status: {}", s),
        }
    }
}

/// Satisfied/total counts for one priority class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassStats {
    pub total: u32,
    pub satisfied: u32,
}

/// What one hierarchical phase found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseRecord {
    pub priority: Priority,
    /// Users in this class (served or not).
    pub users_total: u32,
    /// Optimal coverage found for the class.
    pub served: u32,
    /// Minimized energy over the class's edges, when the energy
    /// sub-step ran.
    pub energy: Option<f64>,
}

/// Derived values and per-class outcomes, for display layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunDiagnostics {
    pub max_range: f64,
    pub interference_range: f64,
    pub high: ClassStats,
    pub medium: ClassStats,
    pub low: ClassStats,
    /// Average priority weight of connected users (0 when nobody is
    /// connected).
    pub avg_connected_weight: f64,
    pub phases: Vec<PhaseRecord>,
}

impl RunDiagnostics {
    pub fn class(&self, priority: Priority) -> ClassStats {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }
}

/// Outcome of one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// AP name -> names of assigned users. Every AP is present on a
    /// successful run; the map is empty on a failed one.
    pub assignments: BTreeMap<String, Vec<String>>,
    pub status: RunStatus,
    pub diagnostics: RunDiagnostics,
}

impl RunReport {
    /// Total number of served users.
    pub fn served_count(&self) -> usize {
        self.assignments.values().map(Vec::len).sum()
    }

    /// The AP serving a user, if any.
    pub fn ap_of(&self, user: &str) -> Option<&str> {
        self.assignments
            .iter()
            .find(|(_, assigned)| assigned.iter().any(|u| u == user))
            .map(|(ap, _)| ap.as_str())
    }

    /// Assemble a successful report from the last phase's solution.
    /// `solution` is `None` only when no solve ran (no feasible edges);
    /// everyone is unserved then.
    pub(crate) fn from_solution(
        users: &[User],
        aps: &[AccessPoint],
        radio: &RadioModel,
        model: &AssignmentModel,
        solution: Option<&Solution>,
        phases: Vec<PhaseRecord>,
    ) -> Self {
        let mut assignments: BTreeMap<String, Vec<String>> = aps
            .iter()
            .map(|ap| (ap.name.clone(), Vec::new()))
            .collect();

        let mut connected_weight = 0u32;
        let mut connected = 0u32;
        let mut satisfied = [0u32; 3];

        if let Some(solution) = solution {
            for edge in 0..model.num_edges() {
                if solution.is_one(model.edge_var(edge)) {
                    let (u_idx, a_idx) = model.edge_endpoints(edge);
                    let user = &users[u_idx];
                    assignments
                        .get_mut(&aps[a_idx].name)
                        .expect("assignment map holds every AP")
                        .push(user.name.clone());
                    connected += 1;
                    connected_weight += user.priority.weight();
                    satisfied[user.priority as usize - 1] += 1;
                }
            }
        }
        for assigned in assignments.values_mut() {
            assigned.sort();
        }

        let totals = class_totals(users);
        let stats = |priority: Priority| ClassStats {
            total: totals[priority as usize - 1],
            satisfied: satisfied[priority as usize - 1],
        };

        RunReport {
            assignments,
            status: RunStatus::Optimal,
            diagnostics: RunDiagnostics {
                max_range: radio.max_range,
                interference_range: radio.interference_range,
                high: stats(Priority::High),
                medium: stats(Priority::Medium),
                low: stats(Priority::Low),
                avg_connected_weight: if connected > 0 {
                    f64::from(connected_weight) / f64::from(connected)
                } else {
                    0.0
                },
                phases,
            },
        }
    }

    /// Assemble a failed report: empty assignment, no partial results
    /// from completed phases.
    pub(crate) fn failed(
        users: &[User],
        radio: &RadioModel,
        status: RunStatus,
        phases: Vec<PhaseRecord>,
    ) -> Self {
        let totals = class_totals(users);
        let stats = |priority: Priority| ClassStats {
            total: totals[priority as usize - 1],
            satisfied: 0,
        };
        RunReport {
            assignments: BTreeMap::new(),
            status,
            diagnostics: RunDiagnostics {
                max_range: radio.max_range,
                interference_range: radio.interference_range,
                high: stats(Priority::High),
                medium: stats(Priority::Medium),
                low: stats(Priority::Low),
                avg_connected_weight: 0.0,
                phases,
            },
        }
    }
}

fn class_totals(users: &[User]) -> [u32; 3] {
    let mut totals = [0u32; 3];
    for user in users {
        totals[user.priority as usize - 1] += 1;
    }
    totals
}
