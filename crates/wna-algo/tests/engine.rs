//! End-to-end tests of the assignment pipeline over the HiGHS backend.

use wna_algo::{HierarchicalEngine, RunStatus, WeightedEngine};
use wna_core::{AccessPoint, Band, DeviceType, Environment, Priority, Settings, User};
use wna_solver_common::HighsSolver;

fn indoor_24(include_power: bool) -> Settings {
    Settings {
        environment: Environment::Indoor,
        band: Band::Ghz2_4,
        include_power_consumption: include_power,
    }
}

fn engine() -> HierarchicalEngine<HighsSolver> {
    HierarchicalEngine::new(HighsSolver::new())
}

/// 3 users at (0,0)H, (1,2)H, (4,0)M; 1 AP at (0,1) with capacity 2.
/// Both High users fit; the Medium user is in range but must be left
/// unserved once capacity is filled by the higher class.
#[test]
fn test_capacity_caps_lower_priority() {
    let users = vec![
        User::new("U1", Priority::High).at(0.0, 0.0),
        User::new("U2", Priority::High).at(1.0, 2.0),
        User::new("U3", Priority::Medium).at(4.0, 0.0),
    ];
    let aps = vec![AccessPoint::new("AP1", 2, 1).at(0.0, 1.0)];

    let report = engine().optimize(&users, &aps, &indoor_24(true)).unwrap();

    assert_eq!(report.status, RunStatus::Optimal);
    assert_eq!(report.diagnostics.max_range, 5.0);
    assert_eq!(report.diagnostics.interference_range, 7.5);
    assert_eq!(report.assignments["AP1"], vec!["U1", "U2"]);
    assert_eq!(report.diagnostics.class(Priority::High).satisfied, 2);
    assert_eq!(report.diagnostics.class(Priority::Medium).satisfied, 0);
    assert_eq!(report.diagnostics.class(Priority::Medium).total, 1);
    assert_eq!(report.diagnostics.class(Priority::Low), wna_algo::ClassStats::default());
    assert!((report.diagnostics.avg_connected_weight - 3.0).abs() < 1e-12);
}

/// Six users, three APs, one interfering AP pair. The AP1-AP2 joint
/// bound works out to 2, so once the High phase fills AP1, AP2 must
/// stay empty and everyone else squeezes into AP3.
#[test]
fn test_full_pipeline_with_interference() {
    let users = vec![
        User::new("U1", Priority::High).at(0.0, 0.0).with_device(DeviceType::Laptop),
        User::new("U2", Priority::High).at(1.0, 2.0).with_device(DeviceType::Smartphone),
        User::new("U3", Priority::Medium).at(4.0, 0.0).with_device(DeviceType::Tablet),
        User::new("U4", Priority::Medium).at(3.0, 3.0).with_device(DeviceType::Wearable),
        User::new("U5", Priority::Low).at(5.0, 2.0).with_device(DeviceType::IotSensor),
        User::new("U6", Priority::Low).at(6.0, 0.0).with_device(DeviceType::Laptop),
    ];
    let aps = vec![
        AccessPoint::new("AP1", 2, 1).at(0.0, 1.0),
        AccessPoint::new("AP2", 2, 1).at(3.0, 0.0),
        AccessPoint::new("AP3", 3, 2).at(5.0, 1.0),
    ];

    let report = engine().optimize(&users, &aps, &indoor_24(true)).unwrap();

    assert_eq!(report.status, RunStatus::Optimal);
    assert_eq!(report.assignments["AP1"], vec!["U1", "U2"]);
    assert_eq!(report.assignments["AP2"], Vec::<String>::new());
    assert_eq!(report.assignments["AP3"], vec!["U3", "U4", "U5"]);

    assert_eq!(report.diagnostics.high.satisfied, 2);
    assert_eq!(report.diagnostics.medium.satisfied, 2);
    assert_eq!(report.diagnostics.low.satisfied, 1);
    assert_eq!(report.diagnostics.low.total, 2);
    assert!((report.diagnostics.avg_connected_weight - 2.2).abs() < 1e-12);

    // Invariants hold regardless of the concrete optimum
    assert_exclusivity_and_capacity(&report.assignments, &aps);
}

/// Two same-channel APs at distance 1 with capacities 3 and 3:
/// the joint bound is 3, so only 3 of the 6 nearby users get served.
#[test]
fn test_interference_bound_limits_joint_load() {
    let users: Vec<User> = (0..6)
        .map(|i| User::new(format!("U{}", i), Priority::Low).at(0.5, 0.2 * f64::from(i)))
        .collect();
    let aps = vec![
        AccessPoint::new("AP1", 3, 1).at(0.0, 0.0),
        AccessPoint::new("AP2", 3, 1).at(1.0, 0.0),
    ];

    let report = engine().optimize(&users, &aps, &indoor_24(false)).unwrap();

    assert_eq!(report.status, RunStatus::Optimal);
    assert_eq!(report.served_count(), 3);
    assert_exclusivity_and_capacity(&report.assignments, &aps);
}

/// Energy tie-break: with coverage equal either way, the user lands on
/// the nearer AP.
#[test]
fn test_energy_prefers_nearer_ap() {
    let users = vec![User::new("U1", Priority::High).at(0.0, 0.0)];
    let aps = vec![
        AccessPoint::new("Far", 1, 2).at(0.0, 4.0),
        AccessPoint::new("Near", 1, 3).at(0.0, 1.0),
    ];

    let report = engine().optimize(&users, &aps, &indoor_24(true)).unwrap();
    assert_eq!(report.ap_of("U1"), Some("Near"));
    assert!(report.assignments["Far"].is_empty());
}

/// The lexicographic guarantee: an expensive High user still wins the
/// only slot over a cheap Low user.
#[test]
fn test_high_priority_never_displaced() {
    let users = vec![
        User::new("H1", Priority::High).at(4.9, 0.0).with_device(DeviceType::Laptop),
        User::new("L1", Priority::Low).at(0.1, 0.0).with_device(DeviceType::IotSensor),
    ];
    let aps = vec![AccessPoint::new("AP1", 1, 1).at(0.0, 0.0)];

    let report = engine().optimize(&users, &aps, &indoor_24(true)).unwrap();
    assert_eq!(report.assignments["AP1"], vec!["H1"]);
    assert_eq!(report.diagnostics.low.satisfied, 0);
}

/// Removing a High user's feasibility frees capacity: the number of
/// served Medium/Low users never decreases.
#[test]
fn test_priority_monotonicity_under_reduced_feasibility() {
    let aps = vec![AccessPoint::new("AP1", 2, 1).at(0.0, 1.0)];
    let in_range = vec![
        User::new("H1", Priority::High).at(0.0, 0.0),
        User::new("H2", Priority::High).at(1.0, 0.0),
        User::new("M1", Priority::Medium).at(2.0, 0.0),
        User::new("M2", Priority::Medium).at(0.0, 2.0),
    ];
    let mut reduced = in_range.clone();
    reduced[0].position = Some(wna_core::Point::new(100.0, 100.0)); // H1 out of range

    let before = engine().optimize(&in_range, &aps, &indoor_24(true)).unwrap();
    let after = engine().optimize(&reduced, &aps, &indoor_24(true)).unwrap();

    assert_eq!(before.diagnostics.high.satisfied, 2);
    assert_eq!(before.diagnostics.medium.satisfied, 0);
    assert_eq!(after.diagnostics.high.satisfied, 1);
    assert!(after.diagnostics.medium.satisfied >= before.diagnostics.medium.satisfied);
    assert_eq!(after.diagnostics.medium.satisfied, 1);
}

/// Two runs on identical inputs yield identical assignments and status.
#[test]
fn test_idempotence() {
    let users = vec![
        User::new("U1", Priority::High).at(0.0, 0.0).with_device(DeviceType::Laptop),
        User::new("U2", Priority::Medium).at(1.0, 2.0),
        User::new("U3", Priority::Low).at(4.0, 0.0).with_device(DeviceType::Tablet),
    ];
    let aps = vec![
        AccessPoint::new("AP1", 2, 1).at(0.0, 1.0),
        AccessPoint::new("AP2", 1, 1).at(3.0, 0.0),
    ];

    let first = engine().optimize(&users, &aps, &indoor_24(true)).unwrap();
    let second = engine().optimize(&users, &aps, &indoor_24(true)).unwrap();
    assert_eq!(first, second);
}

/// The weighted single-shot policy runs end to end on the same input
/// shape. With a tiny lambda it serves everyone it can.
#[test]
fn test_weighted_engine_end_to_end() {
    let users = vec![
        User::new("U1", Priority::High).at(0.0, 0.0),
        User::new("U2", Priority::Low).at(1.0, 0.0),
    ];
    let aps = vec![AccessPoint::new("AP1", 2, 1).at(0.0, 1.0)];

    let report = WeightedEngine::new(HighsSolver::new(), 0.01)
        .optimize(&users, &aps, &indoor_24(true))
        .unwrap();
    assert_eq!(report.status, RunStatus::Optimal);
    assert_eq!(report.served_count(), 2);
}

fn assert_exclusivity_and_capacity(
    assignments: &std::collections::BTreeMap<String, Vec<String>>,
    aps: &[AccessPoint],
) {
    let mut seen = std::collections::HashSet::new();
    for (ap_name, assigned) in assignments {
        let ap = aps.iter().find(|a| &a.name == ap_name).unwrap();
        assert!(assigned.len() <= ap.capacity as usize, "capacity violated at {}", ap_name);
        for user in assigned {
            assert!(seen.insert(user.clone()), "user {} assigned twice", user);
        }
    }
}
