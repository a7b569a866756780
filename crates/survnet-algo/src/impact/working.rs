//! Per-scenario working topology.

use crate::arena::ArenaContext;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use survnet_core::Topology;

const UNLABELED: usize = usize::MAX;

/// The topology as seen under one failure scenario.
///
/// Scenario edges are masked rather than removed, so edge ids stay valid and
/// the shared [`Topology`] is never mutated. Everything scenario-specific is
/// allocated from the caller's arena; one `WorkingTopology` must not outlive
/// the scenario it was built for.
pub struct WorkingTopology<'a> {
    disabled: hashbrown::HashSet<usize, hashbrown::DefaultHashBuilder, &'a bumpalo::Bump>,
    /// Connected component of every vertex once the disabled edges are gone
    components: bumpalo::collections::Vec<'a, usize>,
    component_count: usize,
}

impl<'a> WorkingTopology<'a> {
    pub fn new(topology: &'a Topology, failed: &[usize], ctx: &'a ArenaContext) -> Self {
        let mut disabled = ctx.alloc_hashset::<usize>();
        disabled.extend(failed.iter().copied());

        let vertex_count = topology.vertex_count();
        let mut components = ctx.alloc_vec_filled(vertex_count, UNLABELED);
        let mut stack = ctx.alloc_vec::<usize>();
        let mut component_count = 0;

        for start in 0..vertex_count {
            if components[start] != UNLABELED {
                continue;
            }
            components[start] = component_count;
            stack.push(start);
            while let Some(current) = stack.pop() {
                for edge_ref in topology.graph.edges(NodeIndex::new(current)) {
                    if disabled.contains(&edge_ref.id().index()) {
                        continue;
                    }
                    let neighbor = if edge_ref.source().index() == current {
                        edge_ref.target().index()
                    } else {
                        edge_ref.source().index()
                    };
                    if components[neighbor] == UNLABELED {
                        components[neighbor] = component_count;
                        stack.push(neighbor);
                    }
                }
            }
            component_count += 1;
        }

        Self {
            disabled,
            components,
            component_count,
        }
    }

    pub fn is_disabled(&self, edge: usize) -> bool {
        self.disabled.contains(&edge)
    }

    /// Whether any path joins `source` and `destination` over surviving edges.
    ///
    /// Unknown vertices are never reachable.
    pub fn is_reachable(&self, source: usize, destination: usize) -> bool {
        match (self.components.get(source), self.components.get(destination)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub fn component_count(&self) -> usize {
        self.component_count
    }
}
