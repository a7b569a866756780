//! # survnet-core: Two-Layer Network Topology Core
//!
//! Provides the topology model and path geometry shared by the survivability
//! analysis crates.
//!
//! ## Design Philosophy
//!
//! The logical (high-layer) network is modeled as an **undirected multigraph**:
//! - **Nodes**: [`Vertex`] (routers, ROADMs, sites)
//! - **Edges**: [`Link`] (logical links carrying service demands)
//!
//! Two vertices may be joined by several parallel links, which is why turning an
//! edge path into a vertex path needs the disambiguation in
//! [`graph_utils::edge_path_to_vertices`].
//!
//! Edge identifiers are the petgraph edge indices. They are handed out in
//! insertion order and stay stable because a [`Topology`] never removes edges:
//! failure scenarios mask edges instead of deleting them.
//!
//! ## Quick Start
//!
//! ```rust
//! use survnet_core::*;
//!
//! let mut topology = Topology::with_vertices(3);
//! let ab = topology.add_link(0, 1, "A-B").unwrap();
//! let bc = topology.add_link(1, 2, "B-C").unwrap();
//!
//! let vpath = edge_path_to_vertices(&topology, &[ab, bc], None).unwrap();
//! assert_eq!(vpath, vec![0, 1, 2]);
//! ```
//!
//! ## Modules
//!
//! - [`diagnostics`] - Issue collection for catalogue validation
//! - [`error`] - The shared [`SurvError`] type
//! - [`graph_utils`] - Path geometry and topology statistics

use petgraph::{prelude::*, Undirected};
use serde::{Deserialize, Serialize};

pub mod diagnostics;
pub mod error;
pub mod graph_utils;

pub use diagnostics::{DiagnosticIssue, Diagnostics, Severity};
pub use error::{SurvError, SurvResult};
pub use graph_utils::*;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct VertexId(usize);
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(usize);

impl VertexId {
    #[inline]
    pub fn new(value: usize) -> Self {
        VertexId(value)
    }
    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl LinkId {
    #[inline]
    pub fn new(value: usize) -> Self {
        LinkId(value)
    }
    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct Vertex {
    pub id: VertexId,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct Link {
    pub id: LinkId,
    pub label: String,
    /// Installed spare capacity available for restoration
    pub spare: f64,
}

/// The logical topology: an undirected multigraph with stable edge ids.
#[derive(Debug, Clone)]
pub struct Topology {
    pub graph: Graph<Vertex, Link, Undirected>,
}

impl Topology {
    pub fn new() -> Self {
        Self {
            graph: Graph::new_undirected(),
        }
    }

    /// Topology with `count` unlabeled vertices `0..count`.
    pub fn with_vertices(count: usize) -> Self {
        let mut topology = Self::new();
        for i in 0..count {
            topology.add_vertex(format!("v{i}"));
        }
        topology
    }

    /// Build a topology from `(a, b)` pairs; edge `i` of the list gets id `i`.
    pub fn from_edge_list(vertex_count: usize, edges: &[(usize, usize)]) -> SurvResult<Self> {
        let mut topology = Self::with_vertices(vertex_count);
        for (i, &(a, b)) in edges.iter().enumerate() {
            topology.add_link(a, b, format!("e{i}"))?;
        }
        Ok(topology)
    }

    pub fn add_vertex(&mut self, label: impl Into<String>) -> usize {
        let id = VertexId::new(self.graph.node_count());
        self.graph
            .add_node(Vertex {
                id,
                label: label.into(),
            })
            .index()
    }

    /// Add a link with no spare capacity and return its edge id.
    pub fn add_link(&mut self, a: usize, b: usize, label: impl Into<String>) -> SurvResult<usize> {
        self.add_link_with_spare(a, b, label, 0.0)
    }

    pub fn add_link_with_spare(
        &mut self,
        a: usize,
        b: usize,
        label: impl Into<String>,
        spare: f64,
    ) -> SurvResult<usize> {
        let count = self.graph.node_count();
        if a >= count || b >= count {
            return Err(SurvError::Validation(format!(
                "link {a}-{b} references a vertex outside 0..{count}"
            )));
        }
        let id = LinkId::new(self.graph.edge_count());
        let edge = self.graph.add_edge(
            NodeIndex::new(a),
            NodeIndex::new(b),
            Link {
                id,
                label: label.into(),
                spare,
            },
        );
        Ok(edge.index())
    }

    /// `(source, target)` of an edge, in the order the edge was added.
    pub fn endpoints(&self, edge: usize) -> SurvResult<(usize, usize)> {
        self.graph
            .edge_endpoints(EdgeIndex::new(edge))
            .map(|(a, b)| (a.index(), b.index()))
            .ok_or(SurvError::UnknownEdge(edge))
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn link(&self, edge: usize) -> Option<&Link> {
        self.graph.edge_weight(EdgeIndex::new(edge))
    }

    /// Label of an edge, or `e<id>` when the edge is unknown or unlabeled.
    pub fn link_label(&self, edge: usize) -> String {
        match self.link(edge) {
            Some(link) if !link.label.is_empty() => link.label.clone(),
            _ => format!("e{edge}"),
        }
    }

    pub fn vertex_label(&self, vertex: usize) -> String {
        self.graph
            .node_weight(NodeIndex::new(vertex))
            .map(|v| v.label.clone())
            .unwrap_or_else(|| format!("v{vertex}"))
    }

    /// Installed spare capacity per edge, indexed by edge id.
    pub fn spare_capacity(&self) -> Vec<f64> {
        self.graph.edge_weights().map(|link| link.spare).collect()
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::new()
    }
}
