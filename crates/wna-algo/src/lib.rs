//! # wna-algo: Network Assignment Optimization Engine
//!
//! Assigns wireless users to access points under physical feasibility,
//! capacity, co-channel interference, and priority constraints. The
//! pipeline is one-way:
//!
//! ```text
//! users + APs + settings
//!   -> RadioModel        (feasibility edges, energy costs, interference bounds)
//!   -> AssignmentModel   (binary variables + constraint families, append-only)
//!   -> HierarchicalEngine (N sequential solver calls, freezing between phases)
//!   -> RunReport         (AP -> users map, status, display diagnostics)
//! ```
//!
//! ## Optimization policies
//!
//! | Engine | Policy |
//! |--------|--------|
//! | [`HierarchicalEngine`] | Lexicographic: High, then Medium, then Low; energy breaks ties within a class. Primary. |
//! | [`WeightedEngine`] | Single solve of `sum(w * x) - lambda * sum(c * x)`. Explicit alternative; can trade a High user for several Low ones. |
//!
//! The two policies produce different, non-interchangeable outcomes on
//! the same input; see the [`weighted`] module documentation before
//! choosing the alternative.
//!
//! ## Example
//!
//! ```ignore
//! use wna_algo::HierarchicalEngine;
//! use wna_core::{AccessPoint, Band, Environment, Priority, Settings, User};
//! use wna_solver_common::HighsSolver;
//!
//! let users = vec![User::new("U1", Priority::High).at(0.0, 0.0)];
//! let aps = vec![AccessPoint::new("AP1", 2, 1).at(0.0, 1.0)];
//! let settings = Settings {
//!     environment: Environment::Indoor,
//!     band: Band::Ghz2_4,
//!     include_power_consumption: true,
//! };
//!
//! let engine = HierarchicalEngine::new(HighsSolver::new());
//! let report = engine.optimize(&users, &aps, &settings)?;
//! println!("{}: {} served", report.status, report.served_count());
//! # Ok::<(), wna_core::WnaError>(())
//! ```

pub mod hierarchical;
pub mod model;
pub mod radio;
pub mod report;
pub mod weighted;

pub use hierarchical::HierarchicalEngine;
pub use model::AssignmentModel;
pub use radio::{FeasibleEdge, InterferencePair, RadioModel};
pub use report::{ClassStats, PhaseRecord, RunDiagnostics, RunReport, RunStatus};
pub use weighted::WeightedEngine;
