//! Problem model builder.
//!
//! Lowers a [`RadioModel`] to a binary decision program: one 0/1
//! variable per feasibility edge and the three base constraint
//! families (exclusivity, capacity, interference). The model is owned
//! by exactly one run and only ever grows: the hierarchical phases
//! append coverage pins and frozen-edge equalities on top of the base
//! constraints, never rebuilding what an earlier phase created.

use wna_core::{AccessPoint, Priority, User};
use wna_solver_common::{BinaryProgram, Constraint, Objective, VarId};

use crate::radio::RadioModel;

/// Binary assignment model for one optimization run.
#[derive(Debug)]
pub struct AssignmentModel {
    program: BinaryProgram,
    /// Edge variables, parallel to `RadioModel::edges`.
    edge_vars: Vec<VarId>,
    edge_user: Vec<usize>,
    edge_ap: Vec<usize>,
    edge_cost: Vec<f64>,
    edge_priority: Vec<Priority>,
    /// Edges pinned to 1 by completed phases.
    frozen: Vec<bool>,
}

impl AssignmentModel {
    /// Build the base model: variables plus exclusivity, capacity, and
    /// interference constraints.
    pub fn build(radio: &RadioModel, users: &[User], aps: &[AccessPoint]) -> Self {
        let mut program = BinaryProgram::new();

        let mut edge_vars = Vec::with_capacity(radio.edges.len());
        let mut edge_user = Vec::with_capacity(radio.edges.len());
        let mut edge_ap = Vec::with_capacity(radio.edges.len());
        let mut edge_cost = Vec::with_capacity(radio.edges.len());
        let mut edge_priority = Vec::with_capacity(radio.edges.len());

        for edge in &radio.edges {
            let var = program.add_var(format!(
                "x_{}_{}",
                users[edge.user].name, aps[edge.ap].name
            ));
            edge_vars.push(var);
            edge_user.push(edge.user);
            edge_ap.push(edge.ap);
            edge_cost.push(edge.cost);
            edge_priority.push(users[edge.user].priority);
        }

        // Exclusivity: each user connects to at most one AP (zero is
        // allowed, representing "unserved").
        for (u_idx, user) in users.iter().enumerate() {
            let terms: Vec<(VarId, f64)> = edge_vars
                .iter()
                .zip(&edge_user)
                .filter(|(_, eu)| **eu == u_idx)
                .map(|(v, _)| (*v, 1.0))
                .collect();
            if !terms.is_empty() {
                program.add_constraint(Constraint::less_eq(
                    format!("excl_{}", user.name),
                    terms,
                    1.0,
                ));
            }
        }

        // Capacity: each AP serves at most `capacity` users.
        for (a_idx, ap) in aps.iter().enumerate() {
            let terms: Vec<(VarId, f64)> = edge_vars
                .iter()
                .zip(&edge_ap)
                .filter(|(_, ea)| **ea == a_idx)
                .map(|(v, _)| (*v, 1.0))
                .collect();
            if !terms.is_empty() {
                program.add_constraint(Constraint::less_eq(
                    format!("cap_{}", ap.name),
                    terms,
                    f64::from(ap.capacity),
                ));
            }
        }

        // Interference: joint load of each same-channel pair within the
        // interference radius stays under the derived bound.
        for pair in &radio.interference {
            let terms: Vec<(VarId, f64)> = edge_vars
                .iter()
                .zip(&edge_ap)
                .filter(|(_, ea)| **ea == pair.a || **ea == pair.b)
                .map(|(v, _)| (*v, 1.0))
                .collect();
            if !terms.is_empty() {
                program.add_constraint(Constraint::less_eq(
                    format!("intf_{}_{}", aps[pair.a].name, aps[pair.b].name),
                    terms,
                    f64::from(pair.bound),
                ));
            }
        }

        let frozen = vec![false; edge_vars.len()];
        AssignmentModel {
            program,
            edge_vars,
            edge_user,
            edge_ap,
            edge_cost,
            edge_priority,
            frozen,
        }
    }

    pub fn program(&self) -> &BinaryProgram {
        &self.program
    }

    pub fn num_edges(&self) -> usize {
        self.edge_vars.len()
    }

    pub fn edge_var(&self, edge: usize) -> VarId {
        self.edge_vars[edge]
    }

    /// (user index, AP index) of an edge.
    pub fn edge_endpoints(&self, edge: usize) -> (usize, usize) {
        (self.edge_user[edge], self.edge_ap[edge])
    }

    /// Indices of edges belonging to one priority class.
    pub fn class_edges(&self, priority: Priority) -> Vec<usize> {
        (0..self.edge_vars.len())
            .filter(|e| self.edge_priority[*e] == priority)
            .collect()
    }

    /// Coverage objective for a class: count of its connected users.
    pub fn coverage_objective(&self, priority: Priority) -> Objective {
        let terms = self
            .class_edges(priority)
            .into_iter()
            .map(|e| (self.edge_vars[e], 1.0))
            .collect();
        Objective::maximize(terms)
    }

    /// Energy objective for a class, to be minimized subject to the
    /// pinned coverage count.
    pub fn energy_objective(&self, priority: Priority) -> Objective {
        let terms = self
            .class_edges(priority)
            .into_iter()
            .map(|e| (self.edge_vars[e], self.edge_cost[e]))
            .collect();
        Objective::minimize(terms)
    }

    /// Pin a class's total connected count to the coverage optimum just
    /// found, so the energy step cannot drop anyone.
    pub fn pin_class_coverage(&mut self, priority: Priority, count: f64) {
        let terms: Vec<(VarId, f64)> = self
            .class_edges(priority)
            .into_iter()
            .map(|e| (self.edge_vars[e], 1.0))
            .collect();
        if !terms.is_empty() {
            self.program
                .add_constraint(Constraint::eq(format!("coverage_{}", priority), terms, count));
        }
    }

    /// Freeze an edge at 1 so no later phase can reassign or bump it.
    pub fn freeze_edge(&mut self, edge: usize) {
        if self.frozen[edge] {
            return;
        }
        self.frozen[edge] = true;
        let name = format!("freeze_{}", self.program.var_name(self.edge_vars[edge]));
        self.program
            .add_constraint(Constraint::eq(name, vec![(self.edge_vars[edge], 1.0)], 1.0));
    }

    pub fn frozen_count(&self) -> usize {
        self.frozen.iter().filter(|f| **f).count()
    }
}
