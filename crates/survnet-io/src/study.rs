use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use survnet_algo::{
    AnalysisConfig, AnalysisInputs, CapacityRelease, Demand, EnumerationConfig, FailureCatalogue,
    FailureUnit, ImpactConfig, LayerRelation, SingleCutProbability,
};
use survnet_core::{SurvResult, Topology};

use crate::validate::validate_study;

/// A survivability study: both layers, their relation, and the demand catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudySpec {
    pub name: Option<String>,
    pub topology: TopologySpec,
    #[serde(default)]
    pub low_layer: LowLayerSpec,
    /// Entity index to carried edges; identity when omitted
    #[serde(default)]
    pub relation: Option<BTreeMap<usize, Vec<usize>>>,
    #[serde(default)]
    pub demands: Vec<DemandSpec>,
    #[serde(default)]
    pub options: StudyOptions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopologySpec {
    /// Vertex labels; vertex `i` is the `i`-th entry
    #[serde(default)]
    pub vertices: Vec<String>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: usize,
    pub to: usize,
    pub label: Option<String>,
    #[serde(default)]
    pub spare: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LowLayerSpec {
    #[serde(default)]
    pub entities: Vec<EntitySpec>,
    #[serde(default)]
    pub srgs: Vec<SrgSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySpec {
    pub index: usize,
    pub availability: f64,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SrgSpec {
    pub name: String,
    pub members: Vec<usize>,
    pub availability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandSpec {
    pub name: Option<String>,
    pub capacity: f64,
    /// Candidate paths as edge lists, primary first
    pub paths: Vec<Vec<usize>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyOptions {
    #[serde(default)]
    pub capacity_release: CapacityRelease,
    #[serde(default = "default_max_order")]
    pub max_order: usize,
    #[serde(default)]
    pub single_cut_probability: SingleCutProbability,
}

fn default_max_order() -> usize {
    2
}

impl Default for StudyOptions {
    fn default() -> Self {
        Self {
            capacity_release: CapacityRelease::default(),
            max_order: default_max_order(),
            single_cut_probability: SingleCutProbability::default(),
        }
    }
}

impl StudyOptions {
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            enumeration: EnumerationConfig {
                max_order: self.max_order,
                single_cut_probability: self.single_cut_probability,
            },
            impact: ImpactConfig {
                capacity_release: self.capacity_release,
            },
        }
    }
}

pub fn load_study_from_path(path: &Path) -> Result<StudySpec> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading study '{}'", path.display()))?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
            serde_yaml::from_str(&data).context("parsing study yaml")
        }
        Some(ext) if ext.eq_ignore_ascii_case("json") => {
            serde_json::from_str(&data).context("parsing study json")
        }
        _ => serde_yaml::from_str(&data)
            .or_else(|_| serde_json::from_str(&data))
            .context("parsing study"),
    }
}

impl StudySpec {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("study")
    }

    pub fn build_topology(&self) -> SurvResult<Topology> {
        let mut topology = Topology::new();
        for label in &self.topology.vertices {
            topology.add_vertex(label.as_str());
        }
        for (i, edge) in self.topology.edges.iter().enumerate() {
            let label = edge.label.clone().unwrap_or_else(|| format!("e{i}"));
            topology.add_link_with_spare(edge.from, edge.to, label, edge.spare)?;
        }
        Ok(topology)
    }

    /// Installed spare capacity, indexed by edge id.
    pub fn spare_capacity(&self) -> Vec<f64> {
        self.topology.edges.iter().map(|e| e.spare).collect()
    }

    pub fn relation(&self) -> LayerRelation {
        match &self.relation {
            Some(map) => LayerRelation::from_pairs(
                map.iter()
                    .flat_map(|(&entity, edges)| edges.iter().map(move |&e| (entity, e))),
            ),
            None => {
                let count = self
                    .low_layer
                    .entities
                    .iter()
                    .map(|e| e.index + 1)
                    .max()
                    .unwrap_or(0);
                LayerRelation::identity(count)
            }
        }
    }

    /// Entities in declaration order, then SRGs.
    pub fn catalogue(&self) -> FailureCatalogue {
        let entities = self
            .low_layer
            .entities
            .iter()
            .map(|e| FailureUnit::entity(e.index, e.availability));
        let srgs = self.low_layer.srgs.iter().map(|s| {
            FailureUnit::shared_risk(s.members.clone(), s.availability).with_name(s.name.clone())
        });
        FailureCatalogue::from_units(entities.chain(srgs).collect())
    }

    pub fn demands(&self) -> Vec<Demand> {
        self.demands
            .iter()
            .map(|d| Demand::new(d.capacity, d.paths.clone()))
            .collect()
    }

    /// Declared low-layer entity labels by entity index.
    pub fn entity_labels(&self) -> BTreeMap<usize, String> {
        self.low_layer
            .entities
            .iter()
            .filter_map(|e| e.label.clone().map(|label| (e.index, label)))
            .collect()
    }

    pub fn demand_names(&self) -> Vec<String> {
        self.demands
            .iter()
            .enumerate()
            .map(|(k, d)| d.name.clone().unwrap_or_else(|| format!("d{k}")))
            .collect()
    }
}

/// A validated study, ready for analysis.
#[derive(Debug, Clone)]
pub struct ResolvedStudy {
    pub name: String,
    pub topology: Topology,
    pub catalogue: FailureCatalogue,
    pub relation: LayerRelation,
    pub demands: Vec<Demand>,
    pub demand_names: Vec<String>,
    pub entity_labels: BTreeMap<usize, String>,
    pub spare: Vec<f64>,
    pub config: AnalysisConfig,
}

impl ResolvedStudy {
    pub fn inputs(&self) -> AnalysisInputs<'_> {
        AnalysisInputs {
            topology: &self.topology,
            catalogue: &self.catalogue,
            relation: &self.relation,
            demands: &self.demands,
            spare: &self.spare,
        }
    }

    /// Label of a low-layer entity, or `ent<index>` when none was declared.
    pub fn entity_label(&self, index: usize) -> String {
        self.entity_labels
            .get(&index)
            .cloned()
            .unwrap_or_else(|| format!("ent{index}"))
    }
}

/// Validate a study and build every analysis input from it.
///
/// Warnings are tolerated; any error-severity issue fails the call with all
/// error messages attached.
pub fn resolve_study(spec: &StudySpec) -> Result<ResolvedStudy> {
    let diagnostics = validate_study(spec);
    if diagnostics.has_errors() {
        let messages: Vec<String> = diagnostics.errors().map(|i| i.to_string()).collect();
        return Err(anyhow!(
            "study '{}' failed validation:\n  {}",
            spec.display_name(),
            messages.join("\n  ")
        ));
    }
    let topology = spec
        .build_topology()
        .with_context(|| format!("building topology for study '{}'", spec.display_name()))?;
    Ok(ResolvedStudy {
        name: spec.display_name().to_string(),
        topology,
        catalogue: spec.catalogue(),
        relation: spec.relation(),
        demands: spec.demands(),
        demand_names: spec.demand_names(),
        entity_labels: spec.entity_labels(),
        spare: spec.spare_capacity(),
        config: spec.options.analysis_config(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    const TRIANGLE: &str = r#"
name: triangle
topology:
  vertices: [A, B, C]
  edges:
    - { from: 0, to: 1, label: A-B, spare: 10 }
    - { from: 1, to: 2, label: B-C, spare: 10 }
    - { from: 0, to: 2, label: A-C, spare: 10 }
low_layer:
  entities:
    - { index: 0, availability: 0.99, label: span-AB }
    - { index: 1, availability: 0.98 }
    - { index: 2, availability: 0.97 }
demands:
  - { name: A-B, capacity: 5, paths: [[0], [1, 2]] }
"#;

    #[test]
    fn loads_yaml_by_extension() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(TRIANGLE.as_bytes()).unwrap();
        let spec = load_study_from_path(file.path()).unwrap();
        assert_eq!(spec.display_name(), "triangle");
        assert_eq!(spec.topology.edges.len(), 3);
        assert_eq!(spec.options.max_order, 2);
    }

    #[test]
    fn json_relation_keys_parse_as_indices() {
        let json = r#"{
            "topology": { "vertices": ["A", "B"], "edges": [{ "from": 0, "to": 1 }] },
            "low_layer": { "entities": [{ "index": 0, "availability": 0.9 }] },
            "relation": { "0": [0] }
        }"#;
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        let spec = load_study_from_path(file.path()).unwrap();
        assert_eq!(spec.relation().carried_by(0), &[0]);
    }

    #[test]
    fn omitted_relation_is_identity() {
        let spec: StudySpec = serde_yaml::from_str(TRIANGLE).unwrap();
        let relation = spec.relation();
        assert_eq!(relation.len(), 3);
        assert_eq!(relation.carried_by(2), &[2]);
    }

    #[test]
    fn resolve_builds_inputs() {
        let spec: StudySpec = serde_yaml::from_str(TRIANGLE).unwrap();
        let study = resolve_study(&spec).unwrap();
        assert_eq!(study.topology.edge_count(), 3);
        assert_eq!(study.topology.link_label(1), "B-C");
        assert_eq!(study.spare, vec![10.0, 10.0, 10.0]);
        assert_eq!(study.catalogue.len(), 3);
        assert_eq!(study.demand_names, vec!["A-B".to_string()]);
        assert_eq!(study.entity_label(0), "span-AB");
        assert_eq!(study.entity_label(1), "ent1");
    }

    #[test]
    fn resolve_rejects_invalid_study() {
        let mut spec: StudySpec = serde_yaml::from_str(TRIANGLE).unwrap();
        spec.low_layer.entities[0].availability = 1.5;
        let err = resolve_study(&spec).unwrap_err();
        assert!(err.to_string().contains("failed validation"));
    }
}
