//! Joint-failure enumeration up to double order.
//!
//! ## Key Concepts
//!
//! - **Failure unit:** a single low-layer entity (link, node) or a shared-risk
//!   group (SRG) whose members fail together as one event. Every unit carries an
//!   availability, the probability that it is operational.
//! - **Low-layer cut:** one unit (order 1) or an unordered pair of distinct units
//!   (order 2) failing together. Higher orders are not enumerated; their
//!   probability mass is treated as negligible.
//! - **Scenario:** the set of high-layer edges disabled by a cut, found through
//!   the [`LayerRelation`]. Cuts with the same image are merged into one scenario
//!   whose probability is the sum of theirs and whose multiplicity is their count.
//!
//! ## Probability model
//!
//! Units fail independently. An order-2 cut `{i, j}` has probability
//!
//! ```text
//! P({i, j}) = (1 - a_i)(1 - a_j) · Π_{u ∉ {i, j}} a_u
//! ```
//!
//! over the *whole* catalogue. Membership is decided by unit index, never by the
//! entity content of a unit, so two SRGs with identical members stay distinct.
//! An order-1 cut uses the marginal `1 - a_i` by default
//! (see [`SingleCutProbability`]).

pub mod catalogue;
pub mod enumerate;

pub use catalogue::{FailureCatalogue, FailureUnit, LowLayerCut, SingleCutProbability, UnitKind};
pub use enumerate::{
    inlayer_cuts, multilayer_cuts, CutEnumerator, EnumerationConfig, LayerRelation, Scenario,
    ScenarioSet,
};
