//! Cut enumeration and scenario aggregation.

use super::catalogue::{FailureCatalogue, LowLayerCut, SingleCutProbability};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Which high-layer edges each low-layer entity carries.
///
/// Indexed by low-layer entity index. Entities beyond the table, or with an
/// empty entry, carry nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerRelation {
    carried: Vec<Vec<usize>>,
}

impl LayerRelation {
    pub fn new(carried: Vec<Vec<usize>>) -> Self {
        Self { carried }
    }

    /// Entity `i` carries high-layer edge `i`, for `i` in `0..count`.
    pub fn identity(count: usize) -> Self {
        Self {
            carried: (0..count).map(|i| vec![i]).collect(),
        }
    }

    /// Build from `(low-layer entity, high-layer edge)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut carried: Vec<Vec<usize>> = Vec::new();
        for (low, high) in pairs {
            if carried.len() <= low {
                carried.resize_with(low + 1, Vec::new);
            }
            carried[low].push(high);
        }
        Self { carried }
    }

    pub fn carried_by(&self, entity: usize) -> &[usize] {
        self.carried.get(entity).map_or(&[], Vec::as_slice)
    }

    /// Number of low-layer entities with an entry.
    pub fn len(&self) -> usize {
        self.carried.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carried.is_empty()
    }

    /// High-layer edges disabled when all `entities` fail, ascending.
    pub fn image(&self, entities: &[usize]) -> Vec<usize> {
        let edges: BTreeSet<usize> = entities
            .iter()
            .flat_map(|&e| self.carried_by(e).iter().copied())
            .collect();
        edges.into_iter().collect()
    }
}

/// A distinct set of disabled high-layer edges and the cuts behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Disabled edges, ascending
    pub edges: Vec<usize>,
    /// Sum of the probabilities of every cut mapping onto `edges`
    pub probability: f64,
    /// Number of low-layer cuts mapping onto `edges`
    pub multiplicity: usize,
    /// Lowest order among those cuts
    pub min_order: usize,
}

/// Deduplicated scenarios in first-seen order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub scenarios: Vec<Scenario>,
    /// Number of low-layer cuts that were aggregated
    pub low_layer_cuts: usize,
    /// Probability mass of those cuts
    pub low_layer_probability: f64,
}

impl ScenarioSet {
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Scenario> {
        self.scenarios.iter()
    }

    /// Scenario edge sets, aligned by index with [`Self::probabilities`].
    pub fn edge_sets(&self) -> Vec<Vec<usize>> {
        self.scenarios.iter().map(|s| s.edges.clone()).collect()
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.scenarios.iter().map(|s| s.probability).collect()
    }

    pub fn multiplicities(&self) -> Vec<usize> {
        self.scenarios.iter().map(|s| s.multiplicity).collect()
    }

    pub fn total_probability(&self) -> f64 {
        self.scenarios.iter().map(|s| s.probability).sum()
    }

    /// Group `(key, probability, order)` triples by key.
    fn aggregate(cuts: impl IntoIterator<Item = (Vec<usize>, f64, usize)>) -> Self {
        let mut index: HashMap<Vec<usize>, usize> = HashMap::new();
        let mut set = ScenarioSet::default();
        for (edges, probability, order) in cuts {
            set.low_layer_cuts += 1;
            set.low_layer_probability += probability;
            match index.get(&edges) {
                Some(&pos) => {
                    let scenario = &mut set.scenarios[pos];
                    scenario.probability += probability;
                    scenario.multiplicity += 1;
                    scenario.min_order = scenario.min_order.min(order);
                }
                None => {
                    index.insert(edges.clone(), set.scenarios.len());
                    set.scenarios.push(Scenario {
                        edges,
                        probability,
                        multiplicity: 1,
                        min_order: order,
                    });
                }
            }
        }
        set
    }
}

impl<'a> IntoIterator for &'a ScenarioSet {
    type Item = &'a Scenario;
    type IntoIter = std::slice::Iter<'a, Scenario>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenarios.iter()
    }
}

/// Configuration for cut enumeration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumerationConfig {
    /// Highest cut order to enumerate (1 or 2; larger values act as 2)
    #[serde(default = "default_max_order")]
    pub max_order: usize,
    #[serde(default)]
    pub single_cut_probability: SingleCutProbability,
}

fn default_max_order() -> usize {
    2
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self {
            max_order: default_max_order(),
            single_cut_probability: SingleCutProbability::default(),
        }
    }
}

/// Enumerates cuts from a failure catalogue and folds them into scenarios.
#[derive(Debug, Clone, Default)]
pub struct CutEnumerator {
    config: EnumerationConfig,
}

impl CutEnumerator {
    pub fn new(config: EnumerationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EnumerationConfig {
        &self.config
    }

    /// Order-1 cuts, then order-2 cuts when `max_order >= 2`.
    pub fn low_layer_cuts(&self, catalogue: &FailureCatalogue) -> Vec<LowLayerCut> {
        let mut cuts = Vec::new();
        if self.config.max_order >= 1 {
            cuts.extend(catalogue.single_cuts(self.config.single_cut_probability));
        }
        if self.config.max_order >= 2 {
            cuts.extend(catalogue.double_cuts());
        }
        cuts
    }

    /// Map every low-layer cut through `relation` and merge equal images.
    pub fn multilayer(
        &self,
        catalogue: &FailureCatalogue,
        relation: &LayerRelation,
    ) -> ScenarioSet {
        let cuts = self.low_layer_cuts(catalogue);
        let set = ScenarioSet::aggregate(
            cuts.iter()
                .map(|cut| (relation.image(&cut.entities), cut.probability, cut.order())),
        );
        debug!(
            units = catalogue.len(),
            cuts = set.low_layer_cuts,
            scenarios = set.len(),
            "multilayer cut enumeration"
        );
        set
    }

    /// Pairs of distinct units only, merged by their entity sets.
    ///
    /// Single-unit cuts are not part of this output whatever `max_order` says;
    /// callers that need them take [`FailureCatalogue::single_cuts`] alongside.
    pub fn inlayer(&self, catalogue: &FailureCatalogue) -> ScenarioSet {
        let set = ScenarioSet::aggregate(
            catalogue
                .double_cuts()
                .into_iter()
                .map(|cut| (cut.entities, cut.probability, 2)),
        );
        debug!(
            units = catalogue.len(),
            cuts = set.low_layer_cuts,
            scenarios = set.len(),
            "in-layer cut enumeration"
        );
        set
    }
}

/// Double-order cuts within one layer, merged by entity set.
///
/// `entities[i]` has availability `entities_av[i]`; `srgs[j]` lists the entity
/// indices of shared-risk group `j`, with availability `srgs_av[j]`.
pub fn inlayer_cuts(
    entities: &[usize],
    entities_av: &[f64],
    srgs: &[Vec<usize>],
    srgs_av: &[f64],
) -> ScenarioSet {
    let catalogue = FailureCatalogue::new(entities, entities_av, srgs, srgs_av);
    CutEnumerator::default().inlayer(&catalogue)
}

/// Single and double cuts at the low layer, mapped onto high-layer scenarios.
pub fn multilayer_cuts(
    entities: &[usize],
    entities_av: &[f64],
    relation: &LayerRelation,
    srgs: Option<&[Vec<usize>]>,
    srgs_av: Option<&[f64]>,
) -> ScenarioSet {
    let catalogue = FailureCatalogue::new(
        entities,
        entities_av,
        srgs.unwrap_or_default(),
        srgs_av.unwrap_or_default(),
    );
    CutEnumerator::default().multilayer(&catalogue, relation)
}
