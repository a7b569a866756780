//! # survnet-algo: Survivability Analysis for Two-Layer Networks
//!
//! This crate turns low-layer failure data (physical entities and shared-risk
//! groups with availabilities) into high-layer failure scenarios, and measures
//! how a catalogue of demands fares under each of them.
//!
//! ## Cut Enumeration
//!
//! - [`multilayer_cuts`]: order-1 and order-2 low-layer cuts mapped through the
//!   layer relation and deduplicated into a [`ScenarioSet`]
//! - [`inlayer_cuts`]: order-2 cuts only, identity relation
//! - [`CutEnumerator`]: configurable entry point behind both
//!
//! ## Demand Impact
//!
//! | Function | Result per scenario |
//! |----------|---------------------|
//! | [`compute_ks`] | demands whose every candidate path crosses a failed edge |
//! | [`compute_kp`] | demands whose endpoints stay connected |
//! | [`compute_sp`] | spare capacity per edge after releasing disrupted paths |
//!
//! Reachability runs against a masked view of the topology whose working
//! state lives in a per-worker [`ArenaContext`]. With the `parallel` feature
//! (default) scenarios are evaluated on the rayon pool.
//!
//! ## Survivability
//!
//! [`SurvivabilityMetrics`] folds the reachability results and scenario
//! probabilities into global and per-demand survivability figures.
//!
//! ## Example
//!
//! ```
//! use survnet_algo::{multilayer_cuts, compute_kp, global_survived, Demand, LayerRelation};
//! use survnet_core::Topology;
//!
//! let topology = Topology::from_edge_list(3, &[(0, 1), (1, 2), (0, 2)]).unwrap();
//! let relation = LayerRelation::identity(3);
//! let scenarios = multilayer_cuts(&[0, 1, 2], &[0.99, 0.98, 0.97], &relation, None, None);
//!
//! let demands = vec![Demand::new(1.0, vec![vec![0], vec![1, 2]])];
//! let kp = compute_kp(&topology, &scenarios.edge_sets(), &demands).unwrap();
//! assert!(global_survived(&kp, demands.len()) > 0.5);
//! ```

pub mod arena;
pub mod cuts;
pub mod impact;
pub mod pipeline;
pub mod survivability;

pub use arena::ArenaContext;
pub use cuts::{
    inlayer_cuts, multilayer_cuts, CutEnumerator, EnumerationConfig, FailureCatalogue,
    FailureUnit, LayerRelation, LowLayerCut, Scenario, ScenarioSet, SingleCutProbability,
    UnitKind,
};
pub use impact::{
    analyze_impact, compute_kp, compute_kp_with_sides, compute_sides, compute_sp, compute_ks,
    CapacityRelease, Demand, ImpactConfig, ImpactReport, ScenarioImpact,
};
pub use pipeline::{run_analysis, AnalysisConfig, AnalysisInputs, AnalysisOutcome};
pub use survivability::{
    demand_availability, demand_survival, failed_counts, global_survived, survived_counts,
    SurvivabilityMetrics,
};
