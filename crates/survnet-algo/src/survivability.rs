//! Availability metrics from per-scenario reachability.
//!
//! **Metrics:**
//! - **Global survivability ratio**: fraction of scenarios in which every demand
//!   stays reachable. Each scenario counts once, whatever its probability.
//! - **Demand availability**: `1 - Σ p_g` over the scenarios `g` in which the
//!   demand is not reachable. Only enumerated scenarios contribute, so this is
//!   an upper bound when the enumeration stops at double order.
//!
//! Reachability lists and probabilities are aligned by scenario index.

use serde::{Deserialize, Serialize};

fn membership(reachable: &[usize], demand_count: usize) -> Vec<bool> {
    let mut present = vec![false; demand_count];
    for &k in reachable {
        if let Some(slot) = present.get_mut(k) {
            *slot = true;
        }
    }
    present
}

/// Fraction of scenarios where all `demand_count` demands are reachable.
///
/// An empty scenario list counts as fully survivable.
pub fn global_survived(kp: &[Vec<usize>], demand_count: usize) -> f64 {
    if kp.is_empty() {
        return 1.0;
    }
    let survived = kp.iter().filter(|k| k.len() == demand_count).count();
    survived as f64 / kp.len() as f64
}

/// Number of reachable demands per scenario.
pub fn survived_counts(kp: &[Vec<usize>]) -> Vec<usize> {
    kp.iter().map(Vec::len).collect()
}

/// Number of unreachable demands per scenario.
pub fn failed_counts(kp: &[Vec<usize>], demand_count: usize) -> Vec<usize> {
    kp.iter()
        .map(|k| demand_count.saturating_sub(k.len()))
        .collect()
}

/// For each demand, the indices of the scenarios in which it stays reachable.
pub fn demand_survival(kp: &[Vec<usize>], demand_count: usize) -> Vec<Vec<usize>> {
    let mut survival = vec![Vec::new(); demand_count];
    for (g, reachable) in kp.iter().enumerate() {
        for &k in reachable {
            if let Some(list) = survival.get_mut(k) {
                list.push(g);
            }
        }
    }
    survival
}

/// Per-demand availability over the enumerated scenarios.
pub fn demand_availability(
    kp: &[Vec<usize>],
    demand_count: usize,
    probabilities: &[f64],
) -> Vec<f64> {
    let mut unavailability = vec![0.0; demand_count];
    for (reachable, &p) in kp.iter().zip(probabilities) {
        let present = membership(reachable, demand_count);
        for (k, lost) in unavailability.iter_mut().enumerate() {
            if !present[k] {
                *lost += p;
            }
        }
    }
    unavailability.into_iter().map(|lost| 1.0 - lost).collect()
}

/// All survivability metrics for one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurvivabilityMetrics {
    pub demand_count: usize,
    pub scenario_count: usize,
    /// Fraction of scenarios with every demand reachable
    pub global_ratio: f64,
    pub demand_availability: Vec<f64>,
    pub survived: Vec<usize>,
    pub failed: Vec<usize>,
    pub demand_survival: Vec<Vec<usize>>,
    /// Probability mass of the scenarios analysed
    pub covered_probability: f64,
    /// Probability mass of the scenarios in which some demand is unreachable
    pub disruptive_probability: f64,
}

impl SurvivabilityMetrics {
    pub fn compute(kp: &[Vec<usize>], demand_count: usize, probabilities: &[f64]) -> Self {
        let failed = failed_counts(kp, demand_count);
        let disruptive_probability = failed
            .iter()
            .zip(probabilities)
            .filter(|(f, _)| **f > 0)
            .map(|(_, p)| *p)
            .sum();
        Self {
            demand_count,
            scenario_count: kp.len(),
            global_ratio: global_survived(kp, demand_count),
            demand_availability: demand_availability(kp, demand_count, probabilities),
            survived: survived_counts(kp),
            failed,
            demand_survival: demand_survival(kp, demand_count),
            covered_probability: probabilities.iter().take(kp.len()).sum(),
            disruptive_probability,
        }
    }

    /// Lowest demand availability, or 1.0 with no demands.
    pub fn worst_availability(&self) -> f64 {
        self.demand_availability
            .iter()
            .copied()
            .fold(1.0, f64::min)
    }

    pub fn summary(&self) -> String {
        format!(
            "Survivability: {}/{} scenarios fully survived ({:.2}%), worst demand availability {:.6}, disruptive mass {:.3e}",
            self.survived.iter().filter(|&&s| s == self.demand_count).count(),
            self.scenario_count,
            100.0 * self.global_ratio,
            self.worst_availability(),
            self.disruptive_probability
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_global_survived_counts_full_scenarios() {
        let kp = vec![vec![0, 1], vec![0], vec![0, 1], vec![]];
        assert!(close(global_survived(&kp, 2), 0.5));
        assert!(close(global_survived(&[], 2), 1.0));
    }

    #[test]
    fn test_counts() {
        let kp = vec![vec![0, 1], vec![1]];
        assert_eq!(survived_counts(&kp), vec![2, 1]);
        assert_eq!(failed_counts(&kp, 2), vec![0, 1]);
        assert_eq!(demand_survival(&kp, 2), vec![vec![0], vec![0, 1]]);
    }

    #[test]
    fn test_demand_availability_sums_lost_mass() {
        let kp = vec![vec![0, 1], vec![1], vec![]];
        let av = demand_availability(&kp, 2, &[0.1, 0.02, 0.003]);
        assert!(close(av[0], 1.0 - 0.023));
        assert!(close(av[1], 1.0 - 0.003));
    }

    #[test]
    fn test_metrics_bundle() {
        let kp = vec![vec![0], vec![]];
        let metrics = SurvivabilityMetrics::compute(&kp, 1, &[0.01, 0.002]);
        assert_eq!(metrics.scenario_count, 2);
        assert!(close(metrics.global_ratio, 0.5));
        assert!(close(metrics.covered_probability, 0.012));
        assert!(close(metrics.disruptive_probability, 0.002));
        assert!(close(metrics.worst_availability(), 0.998));
        assert!(metrics.summary().contains("1/2 scenarios"));
    }
}
