use crate::{SurvError, SurvResult, Topology};
use petgraph::algo::connected_components;
use petgraph::visit::EdgeRef;
use std::collections::HashSet;

/// Summary statistics produced by `inspect` (degree spread, components, parallel links).
#[derive(Debug)]
pub struct TopologyStats {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub connected_components: usize,
    pub min_degree: usize,
    pub avg_degree: f64,
    pub max_degree: usize,
    pub density: f64,
    /// Edges that share both endpoints with an earlier edge
    pub parallel_edges: usize,
    pub self_loops: usize,
}

/// Calculates topology-level statistics for operator reporting.
pub fn topology_stats(topology: &Topology) -> TopologyStats {
    let graph = &topology.graph;
    let vertex_count = graph.node_count();
    let edge_count = graph.edge_count();
    let degrees: Vec<usize> = graph
        .node_indices()
        .map(|node| graph.edges(node).count())
        .collect();
    let min_degree = *degrees.iter().min().unwrap_or(&0);
    let max_degree = *degrees.iter().max().unwrap_or(&0);
    let avg_degree = if vertex_count == 0 {
        0.0
    } else {
        degrees.iter().copied().sum::<usize>() as f64 / vertex_count as f64
    };
    let density = if vertex_count < 2 {
        0.0
    } else {
        2.0 * edge_count as f64 / (vertex_count as f64 * (vertex_count as f64 - 1.0))
    };

    let mut seen_pairs = HashSet::new();
    let mut parallel_edges = 0;
    let mut self_loops = 0;
    for edge in graph.edge_references() {
        let (a, b) = (edge.source().index(), edge.target().index());
        if a == b {
            self_loops += 1;
        }
        if !seen_pairs.insert((a.min(b), a.max(b))) {
            parallel_edges += 1;
        }
    }

    TopologyStats {
        vertex_count,
        edge_count,
        connected_components: connected_components(graph),
        min_degree,
        avg_degree,
        max_degree,
        density,
        parallel_edges,
        self_loops,
    }
}

/// Converts an edge path into the vertex path it walks.
///
/// The result has one more element than `epath`. When `start` is given the walk
/// begins there, and the edge order is reversed if `start` is an endpoint of the
/// last edge. That is enough to orient a path between parallel links but callers
/// with more complex walks must sequence the edges themselves.
///
/// Without a hint, a multi-edge path starts at the endpoint of the first edge
/// that is not shared with the second edge (the target, if both are shared).
/// A single edge starts at its source.
///
/// # Errors
///
/// - [`SurvError::EmptyPath`] for an empty edge list
/// - [`SurvError::UnknownEdge`] for an edge id outside the topology
/// - [`SurvError::SelfLoopPath`] for a lone self-loop edge with no hint
/// - [`SurvError::DiscontinuousPath`] when consecutive edges do not meet
pub fn edge_path_to_vertices(
    topology: &Topology,
    epath: &[usize],
    start: Option<usize>,
) -> SurvResult<Vec<usize>> {
    let (&first, &last) = match (epath.first(), epath.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(SurvError::EmptyPath),
    };

    let mut vpath = Vec::with_capacity(epath.len() + 1);
    let mut edges = epath.to_vec();

    match start {
        Some(v) => {
            vpath.push(v);
            let (s, t) = topology.endpoints(last)?;
            if v == s || v == t {
                edges.reverse();
            }
        }
        None if epath.len() > 1 => {
            let (s0, t0) = topology.endpoints(first)?;
            let (s1, t1) = topology.endpoints(epath[1])?;
            if s0 == s1 || s0 == t1 {
                vpath.push(t0);
            } else {
                vpath.push(s0);
            }
        }
        None => {
            let (s, t) = topology.endpoints(first)?;
            if s == t {
                return Err(SurvError::SelfLoopPath(first));
            }
            vpath.push(s);
        }
    }

    for edge in edges {
        let (s, t) = topology.endpoints(edge)?;
        let current = vpath[vpath.len() - 1];
        if s == current {
            vpath.push(t);
        } else if t == current {
            vpath.push(s);
        } else {
            return Err(SurvError::DiscontinuousPath {
                edge,
                vertex: current,
            });
        }
    }
    Ok(vpath)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_with_parallel() -> Topology {
        // 0 -e0- 1 -e1- 2, plus e2 parallel to e1 stored as (2, 1)
        Topology::from_edge_list(3, &[(0, 1), (1, 2), (2, 1)]).unwrap()
    }

    #[test]
    fn test_multi_edge_path_infers_start() {
        let topology = line_with_parallel();
        assert_eq!(
            edge_path_to_vertices(&topology, &[0, 1], None).unwrap(),
            vec![0, 1, 2]
        );
        assert_eq!(
            edge_path_to_vertices(&topology, &[1, 0], None).unwrap(),
            vec![2, 1, 0]
        );
    }

    #[test]
    fn test_single_edge_uses_source() {
        let topology = line_with_parallel();
        assert_eq!(
            edge_path_to_vertices(&topology, &[2], None).unwrap(),
            vec![2, 1]
        );
    }

    #[test]
    fn test_start_hint_orients_single_edge() {
        let topology = line_with_parallel();
        assert_eq!(
            edge_path_to_vertices(&topology, &[2], Some(1)).unwrap(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_start_hint_reverses_edge_order() {
        let topology = line_with_parallel();
        assert_eq!(
            edge_path_to_vertices(&topology, &[0, 1], Some(2)).unwrap(),
            vec![2, 1, 0]
        );
    }

    #[test]
    fn test_discontinuous_path_fails() {
        let topology = Topology::from_edge_list(4, &[(0, 1), (2, 3), (1, 2)]).unwrap();
        let err = edge_path_to_vertices(&topology, &[0, 1], None).unwrap_err();
        assert!(matches!(err, SurvError::DiscontinuousPath { edge: 1, vertex: 1 }));
    }

    #[test]
    fn test_empty_and_unknown() {
        let topology = line_with_parallel();
        assert!(matches!(
            edge_path_to_vertices(&topology, &[], None),
            Err(SurvError::EmptyPath)
        ));
        assert!(matches!(
            edge_path_to_vertices(&topology, &[9], None),
            Err(SurvError::UnknownEdge(9))
        ));
    }

    #[test]
    fn test_lone_self_loop_is_rejected() {
        let topology = Topology::from_edge_list(1, &[(0, 0)]).unwrap();
        assert!(matches!(
            edge_path_to_vertices(&topology, &[0], None),
            Err(SurvError::SelfLoopPath(0))
        ));
        assert_eq!(
            edge_path_to_vertices(&topology, &[0], Some(0)).unwrap(),
            vec![0, 0]
        );
    }

    #[test]
    fn test_topology_stats_counts_parallel_links() {
        let topology = line_with_parallel();
        let stats = topology_stats(&topology);
        assert_eq!(stats.vertex_count, 3);
        assert_eq!(stats.edge_count, 3);
        assert_eq!(stats.connected_components, 1);
        assert_eq!(stats.parallel_edges, 1);
        assert_eq!(stats.self_loops, 0);
        assert_eq!(stats.max_degree, 3);
        assert_eq!(stats.min_degree, 1);
    }
}
