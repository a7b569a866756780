//! The fixed-order catalogue of failure units and the cuts drawn from it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Whether a unit is a lone entity or a correlated group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UnitKind {
    Entity,
    SharedRisk { name: Option<String> },
}

/// One independent failure event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureUnit {
    pub kind: UnitKind,
    /// Low-layer entity indices that go down when this unit fails
    pub members: Vec<usize>,
    /// Probability the unit is operational (not validated; see `survnet-io`)
    pub availability: f64,
}

impl FailureUnit {
    pub fn entity(index: usize, availability: f64) -> Self {
        Self {
            kind: UnitKind::Entity,
            members: vec![index],
            availability,
        }
    }

    pub fn shared_risk(members: Vec<usize>, availability: f64) -> Self {
        Self {
            kind: UnitKind::SharedRisk { name: None },
            members,
            availability,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        if let UnitKind::SharedRisk { name: slot } = &mut self.kind {
            *slot = Some(name.into());
        }
        self
    }

    #[inline]
    pub fn unavailability(&self) -> f64 {
        1.0 - self.availability
    }
}

/// How an order-1 cut is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingleCutProbability {
    /// `1 - a_i`: the unit is down, whatever the others do.
    #[default]
    Marginal,
    /// `(1 - a_i) · Π_{u ≠ i} a_u`: the unit is the only one down. With this
    /// pricing the order-1 and order-2 cuts plus the all-up state partition the
    /// probability space when there are at most two units.
    Exclusive,
}

/// A set of failure units assumed to fail simultaneously.
#[derive(Debug, Clone, PartialEq)]
pub struct LowLayerCut {
    /// Indices into the catalogue, ascending
    pub units: Vec<usize>,
    /// Union of the units' member entities, ascending and deduplicated
    pub entities: Vec<usize>,
    pub probability: f64,
}

impl LowLayerCut {
    /// Order of this cut (1 or 2).
    pub fn order(&self) -> usize {
        self.units.len()
    }
}

/// Failure units in a fixed, indexed order: singleton entities first, then SRGs.
#[derive(Debug, Clone, Default)]
pub struct FailureCatalogue {
    units: Vec<FailureUnit>,
}

impl FailureCatalogue {
    /// Build the catalogue `entities ∪ srgs`.
    ///
    /// `entities[i]` pairs with `entities_av[i]` and `srgs[j]` with `srgs_av[j]`;
    /// surplus elements of the longer list in either pair are ignored.
    pub fn new(
        entities: &[usize],
        entities_av: &[f64],
        srgs: &[Vec<usize>],
        srgs_av: &[f64],
    ) -> Self {
        let units = entities
            .iter()
            .zip(entities_av)
            .map(|(&index, &av)| FailureUnit::entity(index, av))
            .chain(
                srgs.iter()
                    .zip(srgs_av)
                    .map(|(members, &av)| FailureUnit::shared_risk(members.clone(), av)),
            )
            .collect();
        Self { units }
    }

    pub fn from_units(units: Vec<FailureUnit>) -> Self {
        Self { units }
    }

    pub fn units(&self) -> &[FailureUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Probability that every unit is operational.
    pub fn all_operational_probability(&self) -> f64 {
        self.units.iter().map(|u| u.availability).product()
    }

    /// Joint probability that exactly the units in `failed` are down.
    fn joint_probability(&self, failed: &[usize]) -> f64 {
        self.units
            .iter()
            .enumerate()
            .map(|(idx, unit)| {
                if failed.contains(&idx) {
                    unit.unavailability()
                } else {
                    unit.availability
                }
            })
            .product()
    }

    fn cut_of(&self, units: Vec<usize>, probability: f64) -> LowLayerCut {
        let entities: BTreeSet<usize> = units
            .iter()
            .flat_map(|&idx| self.units[idx].members.iter().copied())
            .collect();
        LowLayerCut {
            units,
            entities: entities.into_iter().collect(),
            probability,
        }
    }

    /// Every unit failing on its own, in catalogue order.
    pub fn single_cuts(&self, pricing: SingleCutProbability) -> Vec<LowLayerCut> {
        (0..self.units.len())
            .map(|idx| {
                let probability = match pricing {
                    SingleCutProbability::Marginal => self.units[idx].unavailability(),
                    SingleCutProbability::Exclusive => self.joint_probability(&[idx]),
                };
                self.cut_of(vec![idx], probability)
            })
            .collect()
    }

    /// Every unordered pair of distinct units, in lexicographic index order.
    pub fn double_cuts(&self) -> Vec<LowLayerCut> {
        let n = self.units.len();
        let mut cuts = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                let probability = self.joint_probability(&[i, j]);
                cuts.push(self.cut_of(vec![i, j], probability));
            }
        }
        cuts
    }

    /// Order-1 cuts followed by order-2 cuts.
    pub fn low_layer_cuts(&self, pricing: SingleCutProbability) -> Vec<LowLayerCut> {
        let mut cuts = self.single_cuts(pricing);
        cuts.extend(self.double_cuts());
        cuts
    }
}
