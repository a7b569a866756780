use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;
use survnet_algo::{AnalysisOutcome, SurvivabilityMetrics};
use survnet_core::Topology;

/// One scenario with its impact, in the shape written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRecord {
    pub edges: Vec<usize>,
    pub edge_labels: Vec<String>,
    pub probability: f64,
    pub multiplicity: usize,
    pub min_order: usize,
    /// Demands with every candidate path cut
    pub disrupted: Vec<usize>,
    /// Demands whose endpoints remain connected
    pub reachable: Vec<usize>,
    pub residual: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandRecord {
    pub name: String,
    pub source: usize,
    pub destination: usize,
    pub availability: f64,
    /// Indices of the scenarios in which the demand stays reachable
    pub surviving_scenarios: Vec<usize>,
}

/// Everything an analysis run exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyResults {
    pub study: String,
    pub low_layer_cuts: usize,
    pub low_layer_probability: f64,
    pub scenarios: Vec<ScenarioRecord>,
    pub demands: Vec<DemandRecord>,
    pub metrics: SurvivabilityMetrics,
}

impl StudyResults {
    pub fn from_outcome(
        study: &str,
        topology: &Topology,
        demand_names: &[String],
        outcome: &AnalysisOutcome,
    ) -> Self {
        let scenarios = outcome
            .scenarios
            .iter()
            .enumerate()
            .map(|(g, scenario)| {
                let impact = outcome.impact.scenario(g);
                ScenarioRecord {
                    edges: scenario.edges.clone(),
                    edge_labels: scenario
                        .edges
                        .iter()
                        .map(|&e| topology.link_label(e))
                        .collect(),
                    probability: scenario.probability,
                    multiplicity: scenario.multiplicity,
                    min_order: scenario.min_order,
                    disrupted: impact.map(|i| i.disrupted.to_vec()).unwrap_or_default(),
                    reachable: impact.map(|i| i.reachable.to_vec()).unwrap_or_default(),
                    residual: impact.map(|i| i.residual.to_vec()).unwrap_or_default(),
                }
            })
            .collect();
        let metrics = &outcome.metrics;
        let demands = outcome
            .impact
            .sides
            .iter()
            .enumerate()
            .map(|(k, &(source, destination))| DemandRecord {
                name: demand_names
                    .get(k)
                    .cloned()
                    .unwrap_or_else(|| format!("d{k}")),
                source,
                destination,
                availability: metrics.demand_availability.get(k).copied().unwrap_or(1.0),
                surviving_scenarios: metrics
                    .demand_survival
                    .get(k)
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect();
        Self {
            study: study.to_string(),
            low_layer_cuts: outcome.scenarios.low_layer_cuts,
            low_layer_probability: outcome.scenarios.low_layer_probability,
            scenarios,
            demands,
            metrics: metrics.clone(),
        }
    }
}

pub fn write_results(path: &Path, results: &StudyResults) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory '{}'", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("creating results file '{}'", path.display()))?;
    serde_json::to_writer_pretty(file, results)
        .with_context(|| format!("writing results '{}'", path.display()))?;
    Ok(())
}

pub fn load_results(path: &Path) -> Result<StudyResults> {
    let file =
        File::open(path).with_context(|| format!("opening results '{}'", path.display()))?;
    serde_json::from_reader(file).with_context(|| format!("parsing results '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use survnet_algo::{
        run_analysis, AnalysisConfig, AnalysisInputs, Demand, FailureCatalogue, LayerRelation,
    };
    use tempfile::tempdir;

    #[test]
    fn writes_and_reads_results() {
        let topology = Topology::from_edge_list(3, &[(0, 1), (1, 2), (0, 2)]).unwrap();
        let catalogue = FailureCatalogue::new(&[0, 1, 2], &[0.99, 0.98, 0.97], &[], &[]);
        let relation = LayerRelation::identity(3);
        let demands = vec![Demand::new(5.0, vec![vec![0], vec![1, 2]])];
        let inputs = AnalysisInputs {
            topology: &topology,
            catalogue: &catalogue,
            relation: &relation,
            demands: &demands,
            spare: &[10.0, 10.0, 10.0],
        };
        let outcome = run_analysis(&inputs, &AnalysisConfig::default()).unwrap();
        let results =
            StudyResults::from_outcome("triangle", &topology, &["A-B".to_string()], &outcome);
        assert_eq!(results.scenarios.len(), 6);
        assert_eq!(results.demands[0].source, 0);
        assert_eq!(results.demands[0].destination, 1);
        assert_eq!(results.scenarios[0].edge_labels, vec!["e0".to_string()]);

        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("results.json");
        write_results(&path, &results).unwrap();
        let loaded = load_results(&path).unwrap();
        assert_eq!(loaded.study, "triangle");
        assert_eq!(loaded.scenarios.len(), 6);
        assert_eq!(loaded.demands[0].surviving_scenarios.len(), 4);
    }
}
