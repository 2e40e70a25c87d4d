//! # wna-core: Wireless Network Assignment Entity Model
//!
//! Provides the fundamental data structures for wireless user-to-AP
//! assignment: users, access points, environment settings, and the
//! closed enums that drive the radio model.
//!
//! ## Design Philosophy
//!
//! All inputs are plain, immutable records. Everything the optimizer
//! derives from them (feasibility edges, energy costs, interference
//! bounds) is recomputed per run in `wna-algo`; this crate only holds
//! what the caller supplies, plus the fixed lookup tables that depend
//! on [`Settings`] alone.
//!
//! Priority ordering is a type-level guarantee: [`Priority`] is a
//! closed enum with `High > Medium > Low` under the derived `Ord`, so
//! phase iteration order in the optimizer never depends on string
//! comparisons.
//!
//! ## Quick Start
//!
//! ```rust
//! use wna_core::*;
//!
//! let user = User::new("U1", Priority::High)
//!     .at(0.0, 0.0)
//!     .with_device(DeviceType::Laptop);
//!
//! let ap = AccessPoint::new("AP1", 2, 1).at(0.0, 1.0);
//!
//! let settings = Settings {
//!     environment: Environment::Indoor,
//!     band: Band::Ghz2_4,
//!     include_power_consumption: true,
//! };
//!
//! assert_eq!(settings.max_range(), 5.0);
//! assert!(user.position.unwrap().distance_to(ap.position.unwrap()) <= settings.max_range());
//! ```
//!
//! ## Modules
//!
//! - [`diagnostics`] - Issue collection with severity levels
//! - [`error`] - Unified error type for the wna ecosystem
//! - [`validate`] - Input validation before model construction

use serde::{Deserialize, Serialize};

pub mod diagnostics;
pub mod error;
pub mod validate;

pub use diagnostics::{DiagnosticIssue, Diagnostics, Severity};
pub use error::{WnaError, WnaResult};
pub use validate::{check_inputs, validate_inputs};

/// A planar position in the caller's coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point. Symmetric and non-negative.
    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// User priority class.
///
/// Discriminants are the reporting weights (High=3, Medium=2, Low=1),
/// and the derived `Ord` gives `High > Medium > Low`. The optimizer
/// iterates [`Priority::descending`] so the hierarchical phase order is
/// fixed by the type, not by data.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Priority {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Priority {
    /// Priority weight used for reporting and the weighted objective.
    #[inline]
    pub fn weight(&self) -> u32 {
        *self as u32
    }

    /// All classes in phase order, highest first.
    pub fn descending() -> [Priority; 3] {
        [Priority::High, Priority::Medium, Priority::Low]
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

/// Device category, ordered by radio power demand.
///
/// Free-form device labels from the input layer parse through
/// [`DeviceType::from_label`]; anything unrecognized maps to
/// [`DeviceType::Other`] with the lowest power factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    #[serde(rename = "IoT Sensor")]
    IotSensor,
    Wearable,
    Smartphone,
    Tablet,
    Laptop,
    Other,
}

impl DeviceType {
    /// Parse a free-form device label. Unknown labels become `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "iot sensor" | "iot" => DeviceType::IotSensor,
            "wearable" => DeviceType::Wearable,
            "smartphone" | "phone" => DeviceType::Smartphone,
            "tablet" => DeviceType::Tablet,
            "laptop" => DeviceType::Laptop,
            _ => DeviceType::Other,
        }
    }

    /// Relative transmit power demand, on a fixed ordinal scale.
    pub fn power_factor(&self) -> f64 {
        match self {
            DeviceType::IotSensor | DeviceType::Wearable | DeviceType::Other => 1.0,
            DeviceType::Smartphone => 3.0,
            DeviceType::Tablet => 4.0,
            DeviceType::Laptop => 6.0,
        }
    }
}

impl Default for DeviceType {
    fn default() -> Self {
        DeviceType::Other
    }
}

/// Propagation environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Environment {
    Indoor,
    Urban,
    Outdoor,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Indoor => write!(f, "Indoor"),
            Environment::Urban => write!(f, "Urban"),
            Environment::Outdoor => write!(f, "Outdoor"),
        }
    }
}

/// WiFi frequency band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "2.4GHz")]
    Ghz2_4,
    #[serde(rename = "5GHz")]
    Ghz5,
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Band::Ghz2_4 => write!(f, "2.4GHz"),
            Band::Ghz5 => write!(f, "5GHz"),
        }
    }
}

/// Global environment settings for one optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub environment: Environment,
    pub band: Band,
    /// When false, energy costs keep the distance term but drop the
    /// device power factor.
    pub include_power_consumption: bool,
}

impl Settings {
    /// Maximum feasible user-AP distance for this band and environment.
    ///
    /// 5 GHz ranges are shorter than 2.4 GHz; Outdoor > Urban > Indoor.
    pub fn max_range(&self) -> f64 {
        match (self.band, self.environment) {
            (Band::Ghz2_4, Environment::Indoor) => 5.0,
            (Band::Ghz2_4, Environment::Urban) => 7.0,
            (Band::Ghz2_4, Environment::Outdoor) => 12.0,
            (Band::Ghz5, Environment::Indoor) => 3.0,
            (Band::Ghz5, Environment::Urban) => 5.0,
            (Band::Ghz5, Environment::Outdoor) => 10.0,
        }
    }

    /// Co-channel interference radius: 1.5 x the feasible range.
    pub fn interference_range(&self) -> f64 {
        1.5 * self.max_range()
    }

    /// Path-loss exponent for the environment.
    pub fn path_loss_exponent(&self) -> f64 {
        match self.environment {
            Environment::Indoor => 3.0,
            Environment::Urban => 3.5,
            Environment::Outdoor => 2.7,
        }
    }
}

/// A wireless user requesting a connection.
///
/// Immutable during one optimization run. A user without a position is
/// valid input; it simply has no feasibility edges and stays unserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique, non-empty identifier.
    pub name: String,
    pub priority: Priority,
    pub position: Option<Point>,
    /// Device category; affects the energy cost of serving this user.
    #[serde(default)]
    pub device: DeviceType,
}

impl User {
    pub fn new(name: impl Into<String>, priority: Priority) -> Self {
        User {
            name: name.into(),
            priority,
            position: None,
            device: DeviceType::default(),
        }
    }

    /// Set the planar position.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Point::new(x, y));
        self
    }

    pub fn with_device(mut self, device: DeviceType) -> Self {
        self.device = device;
        self
    }
}

/// An access point serving a capacity-bounded set of users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPoint {
    /// Unique, non-empty identifier.
    pub name: String,
    /// Maximum number of simultaneously served users (>= 1).
    pub capacity: u32,
    /// Radio channel number (>= 1). Same-channel APs within the
    /// interference radius degrade each other's joint capacity.
    pub channel: u32,
    pub position: Option<Point>,
}

impl AccessPoint {
    pub fn new(name: impl Into<String>, capacity: u32, channel: u32) -> Self {
        AccessPoint {
            name: name.into(),
            capacity,
            channel,
            position: None,
        }
    }

    /// Set the planar position.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Point::new(x, y));
        self
    }
}
