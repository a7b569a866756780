//! Demand disruption, reachability and residual capacity on small topologies

use survnet_algo::{
    analyze_impact, compute_kp, compute_ks, compute_sp, multilayer_cuts, CapacityRelease, Demand,
    ImpactConfig, LayerRelation, SurvivabilityMetrics,
};
use survnet_core::Topology;

fn triangle() -> Topology {
    Topology::from_edge_list(3, &[(0, 1), (1, 2), (0, 2)]).unwrap()
}

/// Square 0-1-2-3-0 with a chord 0-2.
fn square_with_chord() -> Topology {
    Topology::from_edge_list(4, &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]).unwrap()
}

#[test]
fn single_edge_cut_does_not_disrupt_protected_demand() {
    let demands = vec![Demand::new(5.0, vec![vec![0], vec![1, 2]])];
    let ks = compute_ks(&[vec![0]], &demands);
    assert!(ks[0].is_empty());

    let ks = compute_ks(&[vec![0, 1]], &demands);
    assert_eq!(ks[0], vec![0]);
}

#[test]
fn residual_capacity_after_disruption() {
    let demands = vec![Demand::new(4.0, vec![vec![0, 1]])];
    let sp = compute_sp(
        &[vec![0]],
        &demands,
        &[10.0, 10.0, 10.0],
        CapacityRelease::PerPath,
    );
    assert_eq!(sp, vec![vec![14.0, 14.0, 10.0]]);
}

#[test]
fn disruption_does_not_imply_unreachability() {
    let topology = square_with_chord();
    // Only the direct edge is listed as a candidate.
    let demands = vec![Demand::new(1.0, vec![vec![0]])];
    let scenarios = vec![vec![0]];
    let ks = compute_ks(&scenarios, &demands);
    let kp = compute_kp(&topology, &scenarios, &demands).unwrap();
    assert_eq!(ks[0], vec![0]);
    assert_eq!(kp[0], vec![0]);
}

#[test]
fn reachability_is_monotone_in_failures() {
    let topology = square_with_chord();
    let demands = vec![
        Demand::new(1.0, vec![vec![0]]),
        Demand::new(1.0, vec![vec![1]]),
        Demand::new(1.0, vec![vec![2]]),
        Demand::new(1.0, vec![vec![4]]),
    ];
    let nested = vec![vec![0], vec![0, 4], vec![0, 1, 4], vec![0, 1, 3, 4]];
    let kp = compute_kp(&topology, &nested, &demands).unwrap();
    for pair in kp.windows(2) {
        assert!(
            pair[1].iter().all(|k| pair[0].contains(k)),
            "{:?} is not a subset of {:?}",
            pair[1],
            pair[0]
        );
    }
    // Vertex 1 is isolated once edges 0 and 1 are both down.
    assert!(!kp[2].contains(&0));
}

#[test]
fn empty_scenario_keeps_everything_reachable() {
    let topology = triangle();
    let demands = vec![
        Demand::new(1.0, vec![vec![0]]),
        Demand::new(1.0, vec![vec![1, 2]]),
    ];
    let kp = compute_kp(&topology, &[vec![]], &demands).unwrap();
    assert_eq!(kp, vec![vec![0, 1]]);
}

#[test]
fn triangle_end_to_end() {
    let topology = triangle();
    let relation = LayerRelation::identity(3);
    let scenarios = multilayer_cuts(&[0, 1, 2], &[0.99, 0.98, 0.97], &relation, None, None);
    let demands = vec![Demand::new(5.0, vec![vec![0], vec![1, 2]])];

    let report = analyze_impact(
        &topology,
        &scenarios.edge_sets(),
        &demands,
        &[10.0, 10.0, 10.0],
        &ImpactConfig::default(),
    )
    .unwrap();
    assert_eq!(report.sides, vec![(0, 1)]);

    for (g, scenario) in scenarios.iter().enumerate() {
        let impact = report.scenario(g).unwrap();
        let hit = |e: usize| scenario.edges.contains(&e);
        let both_cut = hit(0) && (hit(1) || hit(2));
        assert_eq!(impact.disrupted.is_empty(), !both_cut);
        // Disrupted here always means isolated: every route passes e0 or e1+e2.
        assert_eq!(impact.reachable.is_empty(), both_cut);
    }

    let metrics =
        SurvivabilityMetrics::compute(&report.reachable, demands.len(), &scenarios.probabilities());
    assert!((metrics.global_ratio - 4.0 / 6.0).abs() < 1e-12);
    let lost = 0.01 * 0.02 * 0.97 + 0.01 * 0.03 * 0.98;
    assert!((metrics.demand_availability[0] - (1.0 - lost)).abs() < 1e-12);
}
