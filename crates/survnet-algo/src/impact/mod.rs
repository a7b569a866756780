//! Demand impact analysis for a list of failure scenarios.
//!
//! For every scenario (a set of disabled high-layer edges) this module answers
//! three independent questions about the demand catalogue:
//!
//! 1. **Disruption** ([`compute_ks`]): which demands lost *every* candidate path,
//!    so restoration is mandatory.
//! 2. **Reachability** ([`compute_kp`]): which demands still have *some* path
//!    between their endpoints in the surviving topology, whether or not it is
//!    one of their candidate paths.
//! 3. **Residual capacity** ([`compute_sp`]): spare capacity per edge once the
//!    capacity held by disrupted paths is released for restoration.
//!
//! Disruption does not imply unreachability: the topology may offer a path the
//! catalogue never listed.
//!
//! The outputs are plain index and number vectors, ready for an external
//! routing or capacity model.

pub mod working;

pub use working::WorkingTopology;

use crate::arena::ArenaContext;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use survnet_core::{edge_path_to_vertices, SurvError, SurvResult, Topology};
use tracing::debug;

/// A capacity requirement with its primary path and protection paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demand {
    /// Required capacity, in the same unit as edge spare capacity
    pub capacity: f64,
    /// Candidate edge paths; the first is the working path
    pub paths: Vec<Vec<usize>>,
}

impl Demand {
    pub fn new(capacity: f64, paths: Vec<Vec<usize>>) -> Self {
        Self { capacity, paths }
    }

    pub fn primary(&self) -> Option<&[usize]> {
        self.paths.first().map(Vec::as_slice)
    }

    /// Number of candidate paths hit by at least one failed edge.
    pub fn cut_paths(&self, failed: &HashSet<usize>) -> usize {
        self.paths
            .iter()
            .filter(|path| path.iter().any(|e| failed.contains(e)))
            .count()
    }

    /// True when no candidate path survives `failed`.
    pub fn is_disrupted_by(&self, failed: &HashSet<usize>) -> bool {
        self.cut_paths(failed) == self.paths.len()
    }
}

/// How much capacity a disrupted path gives back to its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityRelease {
    /// The demand's capacity once per disrupted (demand, path) pair.
    #[default]
    PerPath,
    /// The demand's capacity once per failed edge found on the path, so a path
    /// cut in two places releases twice.
    PerFailedEdge,
}

impl CapacityRelease {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapacityRelease::PerPath => "per_path",
            CapacityRelease::PerFailedEdge => "per_failed_edge",
        }
    }
}

impl FromStr for CapacityRelease {
    type Err = SurvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "per_path" => Ok(CapacityRelease::PerPath),
            "per_failed_edge" => Ok(CapacityRelease::PerFailedEdge),
            other => Err(SurvError::Config(format!(
                "unknown capacity release policy '{other}' (expected per_path or per_failed_edge)"
            ))),
        }
    }
}

/// Per-scenario lists of demands whose every candidate path is cut.
pub fn compute_ks(scenarios: &[Vec<usize>], demands: &[Demand]) -> Vec<Vec<usize>> {
    scenarios
        .iter()
        .map(|scenario| {
            let failed: HashSet<usize> = scenario.iter().copied().collect();
            demands
                .iter()
                .enumerate()
                .filter(|(_, demand)| demand.is_disrupted_by(&failed))
                .map(|(k, _)| k)
                .collect()
        })
        .collect()
}

/// Source and destination vertex of every demand's primary path.
pub fn compute_sides(
    topology: &Topology,
    demands: &[Demand],
) -> SurvResult<Vec<(usize, usize)>> {
    demands
        .iter()
        .enumerate()
        .map(|(k, demand)| {
            let primary = demand.primary().ok_or(SurvError::MissingPrimaryPath(k))?;
            let vpath = edge_path_to_vertices(topology, primary, None)?;
            Ok((vpath[0], vpath[vpath.len() - 1]))
        })
        .collect()
}

/// Demands whose endpoints stay connected under one scenario.
fn reachable_demands(
    topology: &Topology,
    scenario: &[usize],
    sides: &[(usize, usize)],
    ctx: &ArenaContext,
) -> Vec<usize> {
    let working = WorkingTopology::new(topology, scenario, ctx);
    sides
        .iter()
        .enumerate()
        .filter_map(|(k, &(source, destination))| {
            working.is_reachable(source, destination).then_some(k)
        })
        .collect()
}

/// Reachability lists for precomputed demand endpoints.
pub fn compute_kp_with_sides(
    topology: &Topology,
    scenarios: &[Vec<usize>],
    sides: &[(usize, usize)],
) -> Vec<Vec<usize>> {
    #[cfg(feature = "parallel")]
    {
        scenarios
            .par_iter()
            .map_init(ArenaContext::new, |ctx, scenario| {
                let reachable = reachable_demands(topology, scenario, sides, ctx);
                ctx.reset();
                reachable
            })
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        compute_kp_sequential(topology, scenarios, sides)
    }
}

/// Same result as [`compute_kp_with_sides`], on the calling thread with one arena.
pub fn compute_kp_sequential(
    topology: &Topology,
    scenarios: &[Vec<usize>],
    sides: &[(usize, usize)],
) -> Vec<Vec<usize>> {
    let mut ctx = ArenaContext::new();
    scenarios
        .iter()
        .map(|scenario| {
            let reachable = reachable_demands(topology, scenario, sides, &ctx);
            ctx.reset();
            reachable
        })
        .collect()
}

/// Per-scenario lists of demands that still have any path in the topology.
///
/// Endpoints come from each demand's primary path, so a discontinuous primary
/// path fails the whole call.
pub fn compute_kp(
    topology: &Topology,
    scenarios: &[Vec<usize>],
    demands: &[Demand],
) -> SurvResult<Vec<Vec<usize>>> {
    let sides = compute_sides(topology, demands)?;
    Ok(compute_kp_with_sides(topology, scenarios, &sides))
}

/// Per-scenario spare capacity after disrupted paths release theirs.
///
/// Edge ids beyond `spare` are ignored.
pub fn compute_sp(
    scenarios: &[Vec<usize>],
    demands: &[Demand],
    spare: &[f64],
    release: CapacityRelease,
) -> Vec<Vec<f64>> {
    scenarios
        .iter()
        .map(|scenario| {
            let failed: HashSet<usize> = scenario.iter().copied().collect();
            let mut residual = spare.to_vec();
            for demand in demands {
                for path in &demand.paths {
                    let hits = match release {
                        CapacityRelease::PerPath => {
                            usize::from(path.iter().any(|e| failed.contains(e)))
                        }
                        CapacityRelease::PerFailedEdge => {
                            failed.iter().filter(|&&e| path.contains(&e)).count()
                        }
                    };
                    if hits == 0 {
                        continue;
                    }
                    let released = demand.capacity * hits as f64;
                    for &edge in path {
                        if let Some(slot) = residual.get_mut(edge) {
                            *slot += released;
                        }
                    }
                }
            }
            residual
        })
        .collect()
}

/// Configuration for [`analyze_impact`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImpactConfig {
    #[serde(default)]
    pub capacity_release: CapacityRelease,
}

/// The three per-scenario impact results plus the demand endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImpactReport {
    /// Demands with no surviving candidate path, per scenario
    pub disrupted: Vec<Vec<usize>>,
    /// Demands whose endpoints remain connected, per scenario
    pub reachable: Vec<Vec<usize>>,
    /// Spare capacity per edge, per scenario
    pub residual: Vec<Vec<f64>>,
    /// (source, destination) of every demand
    pub sides: Vec<(usize, usize)>,
}

/// View of one scenario's impact.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioImpact<'a> {
    pub disrupted: &'a [usize],
    pub reachable: &'a [usize],
    pub residual: &'a [f64],
}

impl ImpactReport {
    pub fn scenario_count(&self) -> usize {
        self.reachable.len()
    }

    pub fn scenario(&self, index: usize) -> Option<ScenarioImpact<'_>> {
        Some(ScenarioImpact {
            disrupted: self.disrupted.get(index)?,
            reachable: self.reachable.get(index)?,
            residual: self.residual.get(index)?,
        })
    }

    /// Demands disrupted but still reachable: candidates for restoration over
    /// paths outside the catalogue.
    pub fn restorable(&self, index: usize) -> Vec<usize> {
        match self.scenario(index) {
            Some(impact) => impact
                .disrupted
                .iter()
                .copied()
                .filter(|k| impact.reachable.binary_search(k).is_ok())
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Run disruption, reachability and residual capacity for every scenario.
pub fn analyze_impact(
    topology: &Topology,
    scenarios: &[Vec<usize>],
    demands: &[Demand],
    spare: &[f64],
    config: &ImpactConfig,
) -> SurvResult<ImpactReport> {
    let sides = compute_sides(topology, demands)?;
    let reachable = compute_kp_with_sides(topology, scenarios, &sides);
    let disrupted = compute_ks(scenarios, demands);
    let residual = compute_sp(scenarios, demands, spare, config.capacity_release);
    debug!(
        scenarios = scenarios.len(),
        demands = demands.len(),
        release = config.capacity_release.as_str(),
        "demand impact analysis"
    );
    Ok(ImpactReport {
        disrupted,
        reachable,
        residual,
        sides,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Topology {
        Topology::from_edge_list(3, &[(0, 1), (1, 2), (0, 2)]).unwrap()
    }

    #[test]
    fn test_ks_needs_every_path_cut() {
        let demands = vec![Demand::new(5.0, vec![vec![0], vec![1, 2]])];
        let ks = compute_ks(&[vec![0], vec![0, 1], vec![2]], &demands);
        let expected: Vec<Vec<usize>> = vec![vec![], vec![0], vec![]];
        assert_eq!(ks, expected);
    }

    #[test]
    fn test_demand_without_paths_is_always_disrupted() {
        let demands = vec![Demand::new(1.0, vec![])];
        assert_eq!(compute_ks(&[vec![]], &demands), vec![vec![0]]);
    }

    #[test]
    fn test_sides_from_primary() {
        let demands = vec![
            Demand::new(1.0, vec![vec![0, 1]]),
            Demand::new(1.0, vec![vec![2]]),
        ];
        assert_eq!(
            compute_sides(&triangle(), &demands).unwrap(),
            vec![(0, 2), (0, 2)]
        );
    }

    #[test]
    fn test_sides_missing_primary() {
        let demands = vec![Demand::new(1.0, vec![vec![0]]), Demand::new(1.0, vec![])];
        assert!(matches!(
            compute_sides(&triangle(), &demands),
            Err(SurvError::MissingPrimaryPath(1))
        ));
    }

    #[test]
    fn test_kp_uses_any_topology_path() {
        // Only candidate path is [0]; cutting it still leaves 0-2-1.
        let demands = vec![Demand::new(1.0, vec![vec![0]])];
        let kp = compute_kp(&triangle(), &[vec![0], vec![0, 1]], &demands).unwrap();
        let expected: Vec<Vec<usize>> = vec![vec![0], vec![]];
        assert_eq!(kp, expected);
    }

    #[test]
    fn test_sp_releases_both_edges() {
        let demands = vec![Demand::new(4.0, vec![vec![0, 1]])];
        let spare = [10.0, 10.0, 10.0];
        let sp = compute_sp(&[vec![0]], &demands, &spare, CapacityRelease::PerPath);
        assert_eq!(sp, vec![vec![14.0, 14.0, 10.0]]);
    }

    #[test]
    fn test_sp_release_policies_differ_on_double_hit() {
        let demands = vec![Demand::new(4.0, vec![vec![0, 1]])];
        let spare = [10.0, 10.0, 10.0];
        let scenarios = [vec![0, 1]];
        let per_path = compute_sp(&scenarios, &demands, &spare, CapacityRelease::PerPath);
        let per_edge = compute_sp(&scenarios, &demands, &spare, CapacityRelease::PerFailedEdge);
        assert_eq!(per_path, vec![vec![14.0, 14.0, 10.0]]);
        assert_eq!(per_edge, vec![vec![18.0, 18.0, 10.0]]);
    }

    #[test]
    fn test_capacity_release_parsing() {
        assert_eq!(
            "per-path".parse::<CapacityRelease>().unwrap(),
            CapacityRelease::PerPath
        );
        assert_eq!(
            "PER_FAILED_EDGE".parse::<CapacityRelease>().unwrap(),
            CapacityRelease::PerFailedEdge
        );
        assert!("sometimes".parse::<CapacityRelease>().is_err());
    }

    #[test]
    fn test_capacity_release_label_matches_study_spelling() {
        for policy in [CapacityRelease::PerPath, CapacityRelease::PerFailedEdge] {
            let json = serde_json::to_string(&policy).unwrap();
            assert_eq!(json, format!("\"{}\"", policy.as_str()));
            assert_eq!(policy.as_str().parse::<CapacityRelease>().unwrap(), policy);
        }
    }

    #[test]
    fn test_sequential_kp_matches_default() {
        // Square 0-1-2-3-0 with chord 0-2
        let topology =
            Topology::from_edge_list(4, &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]).unwrap();
        let sides = vec![(0, 1), (1, 3), (2, 3), (0, 2)];
        let scenarios: Vec<Vec<usize>> = vec![
            vec![],
            vec![0],
            vec![0, 1],
            vec![2, 3],
            vec![4],
            vec![1, 4],
            vec![0, 3, 4],
            vec![0, 1, 2, 3, 4],
        ];
        let sequential = compute_kp_sequential(&topology, &scenarios, &sides);
        assert_eq!(
            sequential,
            compute_kp_with_sides(&topology, &scenarios, &sides)
        );
        assert_eq!(sequential[0], vec![0, 1, 2, 3]);
        // Vertex 1 is cut off by losing both of its links.
        assert_eq!(sequential[2], vec![2, 3]);
        assert!(sequential[7].is_empty());
    }

    #[test]
    fn test_restorable_is_disrupted_and_reachable() {
        let demands = vec![Demand::new(5.0, vec![vec![0]])];
        let report = analyze_impact(
            &triangle(),
            &[vec![0]],
            &demands,
            &[0.0, 0.0, 0.0],
            &ImpactConfig::default(),
        )
        .unwrap();
        assert_eq!(report.disrupted, vec![vec![0]]);
        assert_eq!(report.restorable(0), vec![0]);
        assert!(report.restorable(5).is_empty());
    }
}
