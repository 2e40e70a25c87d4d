//! Problem representation for the solver boundary.
//!
//! A [`BinaryProgram`] is an append-only store of binary decision
//! variables and linear constraints. Callers extend it between solve
//! calls (new constraints may pin or freeze earlier results); nothing
//! is ever removed or rewritten, which is what makes the sequential
//! multi-phase protocol in `wna-algo` sound.

use serde::{Deserialize, Serialize};

/// Index of a decision variable within a [`BinaryProgram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VarId(usize);

impl VarId {
    #[inline]
    pub fn new(value: usize) -> Self {
        VarId(value)
    }
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Comparison operator of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintOp {
    /// sum(terms) <= rhs
    LessEq,
    /// sum(terms) == rhs
    Eq,
}

/// A linear constraint over binary variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constraint {
    /// Name for debugging and solver logs (e.g., "cap_AP1")
    pub name: String,
    /// Sparse left-hand side: (variable, coefficient) pairs
    pub terms: Vec<(VarId, f64)>,
    pub op: ConstraintOp,
    pub rhs: f64,
}

impl Constraint {
    /// Build a `sum(terms) <= rhs` constraint.
    pub fn less_eq(name: impl Into<String>, terms: Vec<(VarId, f64)>, rhs: f64) -> Self {
        Constraint {
            name: name.into(),
            terms,
            op: ConstraintOp::LessEq,
            rhs,
        }
    }

    /// Build a `sum(terms) == rhs` constraint.
    pub fn eq(name: impl Into<String>, terms: Vec<(VarId, f64)>, rhs: f64) -> Self {
        Constraint {
            name: name.into(),
            terms,
            op: ConstraintOp::Eq,
            rhs,
        }
    }
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sense {
    Maximize,
    Minimize,
}

/// A linear objective over binary variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Objective {
    pub terms: Vec<(VarId, f64)>,
    pub sense: Sense,
}

impl Objective {
    pub fn maximize(terms: Vec<(VarId, f64)>) -> Self {
        Objective {
            terms,
            sense: Sense::Maximize,
        }
    }

    pub fn minimize(terms: Vec<(VarId, f64)>) -> Self {
        Objective {
            terms,
            sense: Sense::Minimize,
        }
    }

    /// Whether any term has a nonzero coefficient. A degenerate
    /// all-zero objective makes a solve pointless; callers skip it.
    pub fn has_nonzero_terms(&self) -> bool {
        self.terms.iter().any(|(_, c)| *c != 0.0)
    }
}

/// Append-only binary decision model.
///
/// All variables are binary (0/1). Constraints are kept in insertion
/// order; later phases of a run only ever append.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BinaryProgram {
    var_names: Vec<String>,
    constraints: Vec<Constraint>,
}

impl BinaryProgram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binary variable, returning its id.
    pub fn add_var(&mut self, name: impl Into<String>) -> VarId {
        let id = VarId::new(self.var_names.len());
        self.var_names.push(name.into());
        id
    }

    /// Append a constraint. Constraints are never removed.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn num_vars(&self) -> usize {
        self.var_names.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn var_name(&self, id: VarId) -> &str {
        &self.var_names[id.index()]
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
}
