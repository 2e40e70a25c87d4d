//! Geometry & radio model.
//!
//! Turns raw users, APs, and environment settings into the derived
//! structures the optimizer works on: feasibility edges with energy
//! costs, and co-channel interference pairs with joint capacity bounds.
//! Pure function of its inputs; recomputed from scratch on every
//! optimization request, never cached or mutated across runs.

use serde::Serialize;
use wna_core::{AccessPoint, Settings, User};

/// A user-AP pair close enough to be a legal connection candidate.
///
/// Indices refer to the caller's user/AP slices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeasibleEdge {
    pub user: usize,
    pub ap: usize,
    pub distance: f64,
    /// Energy cost of serving this edge; non-negative, monotone in
    /// distance and in device power demand.
    pub cost: f64,
}

/// Two same-channel APs close enough to degrade each other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InterferencePair {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    /// Cap on the combined number of users the two APs may jointly
    /// serve. Degrades toward the smaller single-AP capacity as the
    /// APs converge, and relaxes toward the capacity sum at the edge
    /// of the interference radius.
    pub bound: u32,
}

/// Derived radio model for one optimization run.
#[derive(Debug, Clone, Serialize)]
pub struct RadioModel {
    pub max_range: f64,
    pub interference_range: f64,
    pub path_loss_exponent: f64,
    pub edges: Vec<FeasibleEdge>,
    pub interference: Vec<InterferencePair>,
}

impl RadioModel {
    /// Derive the full radio model from raw entities and settings.
    ///
    /// Pairs with a missing coordinate on either side are silently
    /// excluded from feasibility; that is valid input, not an error.
    pub fn derive(users: &[User], aps: &[AccessPoint], settings: &Settings) -> Self {
        let max_range = settings.max_range();
        let interference_range = settings.interference_range();
        let alpha = settings.path_loss_exponent();

        let mut edges = Vec::new();
        for (u_idx, user) in users.iter().enumerate() {
            let Some(u_pos) = user.position else { continue };
            for (a_idx, ap) in aps.iter().enumerate() {
                let Some(a_pos) = ap.position else { continue };
                let distance = u_pos.distance_to(a_pos);
                if distance <= max_range {
                    let factor = if settings.include_power_consumption {
                        user.device.power_factor()
                    } else {
                        // Keep the distance term so the energy
                        // tie-break still prefers nearer APs.
                        1.0
                    };
                    let cost = 0.1 * factor * distance.powf(alpha) / max_range.powf(alpha);
                    edges.push(FeasibleEdge {
                        user: u_idx,
                        ap: a_idx,
                        distance,
                        cost,
                    });
                }
            }
        }

        let mut interference = Vec::new();
        for (i, ap_a) in aps.iter().enumerate() {
            let Some(pos_a) = ap_a.position else { continue };
            for (j, ap_b) in aps.iter().enumerate().skip(i + 1) {
                let Some(pos_b) = ap_b.position else { continue };
                if ap_a.channel != ap_b.channel {
                    continue;
                }
                let distance = pos_a.distance_to(pos_b);
                if distance <= interference_range {
                    let bound =
                        joint_capacity_bound(ap_a.capacity, ap_b.capacity, distance, interference_range);
                    interference.push(InterferencePair {
                        a: i,
                        b: j,
                        distance,
                        bound,
                    });
                }
            }
        }

        RadioModel {
            max_range,
            interference_range,
            path_loss_exponent: alpha,
            edges,
            interference,
        }
    }

}

/// Joint capacity bound for an interfering AP pair:
/// `floor(k_a + k_b - min(k_a, k_b) * max(0, 1 - d / d_intf))`.
fn joint_capacity_bound(k_a: u32, k_b: u32, distance: f64, interference_range: f64) -> u32 {
    let overlap = (1.0 - distance / interference_range).max(0.0);
    let bound = f64::from(k_a) + f64::from(k_b) - f64::from(k_a.min(k_b)) * overlap;
    bound.floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use wna_core::{Band, DeviceType, Environment, Priority};

    fn indoor_24(include_power: bool) -> Settings {
        Settings {
            environment: Environment::Indoor,
            band: Band::Ghz2_4,
            include_power_consumption: include_power,
        }
    }

    #[test]
    fn test_feasibility_threshold_is_inclusive() {
        // Indoor / 2.4 GHz: max_range = 5; user exactly at the limit
        let users = vec![User::new("U1", Priority::High).at(5.0, 0.0)];
        let aps = vec![AccessPoint::new("AP1", 1, 1).at(0.0, 0.0)];
        let radio = RadioModel::derive(&users, &aps, &indoor_24(true));
        assert_eq!(radio.edges.len(), 1);
        assert_eq!(radio.edges[0].distance, 5.0);

        // A hair beyond the limit is excluded
        let users = vec![User::new("U1", Priority::High).at(5.000001, 0.0)];
        let radio = RadioModel::derive(&users, &aps, &indoor_24(true));
        assert!(radio.edges.is_empty());
    }

    #[test]
    fn test_missing_coordinates_excluded_silently() {
        let users = vec![
            User::new("U1", Priority::High), // no position
            User::new("U2", Priority::High).at(1.0, 0.0),
        ];
        let aps = vec![
            AccessPoint::new("AP1", 1, 1).at(0.0, 0.0),
            AccessPoint::new("AP2", 1, 1), // no position
        ];
        let radio = RadioModel::derive(&users, &aps, &indoor_24(true));
        assert_eq!(radio.edges.len(), 1);
        assert_eq!(radio.edges[0].user, 1);
        assert_eq!(radio.edges[0].ap, 0);
        assert!(radio.interference.is_empty());
    }

    #[test]
    fn test_small_scenario_distances() {
        // 3 users at (0,0)H, (1,2)H, (4,0)M; AP at (0,1)
        let users = vec![
            User::new("U1", Priority::High).at(0.0, 0.0),
            User::new("U2", Priority::High).at(1.0, 2.0),
            User::new("U3", Priority::Medium).at(4.0, 0.0),
        ];
        let aps = vec![AccessPoint::new("AP1", 2, 1).at(0.0, 1.0)];
        let radio = RadioModel::derive(&users, &aps, &indoor_24(true));

        assert_eq!(radio.max_range, 5.0);
        assert_eq!(radio.edges.len(), 3); // all in range
        assert!((radio.edges[0].distance - 1.0).abs() < 1e-12);
        assert!((radio.edges[1].distance - 2.0_f64.sqrt()).abs() < 1e-12);
        assert!((radio.edges[2].distance - 17.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_cost_monotone_in_distance() {
        let users = vec![
            User::new("U1", Priority::Low).at(1.0, 0.0),
            User::new("U2", Priority::Low).at(2.0, 0.0),
            User::new("U3", Priority::Low).at(3.0, 0.0),
        ];
        let aps = vec![AccessPoint::new("AP1", 3, 1).at(0.0, 0.0)];
        let radio = RadioModel::derive(&users, &aps, &indoor_24(true));
        assert!(radio.edges[0].cost < radio.edges[1].cost);
        assert!(radio.edges[1].cost < radio.edges[2].cost);
        assert!(radio.edges[0].cost > 0.0);
    }

    #[test]
    fn test_cost_monotone_in_device_power() {
        let users = vec![
            User::new("U1", Priority::Low).at(2.0, 0.0).with_device(DeviceType::IotSensor),
            User::new("U2", Priority::Low).at(2.0, 0.0).with_device(DeviceType::Smartphone),
            User::new("U3", Priority::Low).at(2.0, 0.0).with_device(DeviceType::Laptop),
        ];
        let aps = vec![AccessPoint::new("AP1", 3, 1).at(0.0, 0.0)];
        let radio = RadioModel::derive(&users, &aps, &indoor_24(true));
        assert!(radio.edges[0].cost < radio.edges[1].cost);
        assert!(radio.edges[1].cost < radio.edges[2].cost);
    }

    #[test]
    fn test_power_disabled_keeps_distance_term() {
        let users = vec![
            User::new("U1", Priority::Low).at(1.0, 0.0).with_device(DeviceType::Laptop),
            User::new("U2", Priority::Low).at(2.0, 0.0).with_device(DeviceType::IotSensor),
        ];
        let aps = vec![AccessPoint::new("AP1", 2, 1).at(0.0, 0.0)];
        let radio = RadioModel::derive(&users, &aps, &indoor_24(false));
        // Device no longer matters; distance still does
        assert!(radio.edges[0].cost > 0.0);
        assert!(radio.edges[0].cost < radio.edges[1].cost);
    }

    #[test]
    fn test_interference_requires_same_channel() {
        let aps = vec![
            AccessPoint::new("AP1", 2, 1).at(0.0, 0.0),
            AccessPoint::new("AP2", 2, 2).at(1.0, 0.0), // different channel
            AccessPoint::new("AP3", 2, 1).at(2.0, 0.0),
        ];
        let radio = RadioModel::derive(&[], &aps, &indoor_24(true));
        // Only AP1-AP3 interfere (same channel, within 7.5)
        assert_eq!(radio.interference.len(), 1);
        assert_eq!((radio.interference[0].a, radio.interference[0].b), (0, 2));
    }

    #[test]
    fn test_interference_pairs_unordered_once_no_self() {
        let aps = vec![
            AccessPoint::new("AP1", 2, 1).at(0.0, 0.0),
            AccessPoint::new("AP2", 2, 1).at(1.0, 0.0),
        ];
        let radio = RadioModel::derive(&[], &aps, &indoor_24(true));
        assert_eq!(radio.interference.len(), 1);
        let pair = radio.interference[0];
        assert!(pair.a < pair.b);
    }

    #[test]
    fn test_joint_bound_limit_behavior() {
        let d_intf = 7.5; // Indoor / 2.4 GHz

        // Converging APs: bound approaches min capacity
        assert_eq!(joint_capacity_bound(3, 3, 0.0, d_intf), 3);

        // Near the edge of the radius: bound approaches the sum but
        // stays strictly below it
        let near_edge = joint_capacity_bound(3, 3, 0.99 * d_intf, d_intf);
        assert!(near_edge < 6);
        assert_eq!(near_edge, 5);

        // Monotone in distance
        let mut prev = 0;
        for step in 0..=10 {
            let d = d_intf * f64::from(step) / 10.0;
            let bound = joint_capacity_bound(3, 3, d, d_intf);
            assert!(bound >= prev);
            prev = bound;
        }

        // Asymmetric capacities degrade toward the smaller AP
        assert_eq!(joint_capacity_bound(1, 5, 0.0, d_intf), 5);
        assert_eq!(joint_capacity_bound(2, 5, 0.0, d_intf), 5);
    }

    #[test]
    fn test_derivation_is_pure_and_repeatable() {
        let users = vec![User::new("U1", Priority::High).at(1.0, 1.0)];
        let aps = vec![
            AccessPoint::new("AP1", 2, 1).at(0.0, 0.0),
            AccessPoint::new("AP2", 2, 1).at(2.0, 2.0),
        ];
        let settings = indoor_24(true);
        let first = RadioModel::derive(&users, &aps, &settings);
        let second = RadioModel::derive(&users, &aps, &settings);
        assert_eq!(first.edges, second.edges);
        assert_eq!(first.interference, second.interference);
    }
}
