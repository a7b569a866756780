//! Ingestion checks for study files.
//!
//! The analysis crates trust their inputs; anything that would make the
//! numbers meaningless is caught here and reported as a [`Diagnostics`] set.

use std::collections::HashSet;
use survnet_core::{edge_path_to_vertices, Diagnostics};

use crate::study::StudySpec;

fn valid_availability(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

fn non_negative(value: f64) -> bool {
    value >= 0.0
}

/// Collect every issue in `spec` without stopping at the first one.
pub fn validate_study(spec: &StudySpec) -> Diagnostics {
    let mut diag = Diagnostics::new();
    let vertex_count = spec.topology.vertices.len();
    let edge_count = spec.topology.edges.len();

    for (i, edge) in spec.topology.edges.iter().enumerate() {
        let entity = format!("Edge {i}");
        if edge.from >= vertex_count || edge.to >= vertex_count {
            diag.add_error_with_entity(
                "topology",
                &format!(
                    "endpoints {}-{} outside the {} declared vertices",
                    edge.from, edge.to, vertex_count
                ),
                &entity,
            );
        }
        if !non_negative(edge.spare) {
            diag.add_error_with_entity(
                "capacity",
                &format!("spare capacity {} is negative", edge.spare),
                &entity,
            );
        }
    }

    let mut declared = HashSet::new();
    for entity in &spec.low_layer.entities {
        let name = format!("Entity {}", entity.index);
        if !declared.insert(entity.index) {
            diag.add_error_with_entity("low_layer", "entity declared twice", &name);
        }
        if !valid_availability(entity.availability) {
            diag.add_error_with_entity(
                "availability",
                &format!("availability {} outside [0, 1]", entity.availability),
                &name,
            );
        }
    }

    for srg in &spec.low_layer.srgs {
        let name = format!("SRG {}", srg.name);
        if !valid_availability(srg.availability) {
            diag.add_error_with_entity(
                "availability",
                &format!("availability {} outside [0, 1]", srg.availability),
                &name,
            );
        }
        if srg.members.is_empty() {
            diag.add_warning_with_entity("srg", "shared-risk group has no members", &name);
        }
        for member in &srg.members {
            if !declared.contains(member) {
                diag.add_error_with_entity(
                    "srg",
                    &format!("member {member} is not a declared entity"),
                    &name,
                );
            }
        }
    }

    let relation = spec.relation();
    if let Some(map) = &spec.relation {
        for entity in map.keys() {
            if !declared.contains(entity) {
                diag.add_warning_with_entity(
                    "relation",
                    "relation entry for an undeclared entity",
                    &format!("Entity {entity}"),
                );
            }
        }
    }
    for entity in &spec.low_layer.entities {
        let name = format!("Entity {}", entity.index);
        let carried = relation.carried_by(entity.index);
        if carried.is_empty() {
            diag.add_warning_with_entity("relation", "entity carries no edge", &name);
        }
        for &edge in carried {
            if edge >= edge_count {
                diag.add_error_with_entity(
                    "relation",
                    &format!("carried edge {edge} does not exist"),
                    &name,
                );
            }
        }
    }

    // Only a structurally sound topology can answer path continuity.
    let topology = if diag.has_errors() {
        None
    } else {
        spec.build_topology().ok()
    };

    for (k, demand) in spec.demands.iter().enumerate() {
        let name = match &demand.name {
            Some(n) => format!("Demand {k} ({n})"),
            None => format!("Demand {k}"),
        };
        if !non_negative(demand.capacity) {
            diag.add_error_with_entity(
                "demand",
                &format!("capacity {} is negative", demand.capacity),
                &name,
            );
        }
        if demand.paths.is_empty() || demand.paths[0].is_empty() {
            diag.add_error_with_entity("demand", "no primary path", &name);
            continue;
        }
        let mut known = true;
        for path in &demand.paths {
            for &edge in path {
                if edge >= edge_count {
                    known = false;
                    diag.add_error_with_entity(
                        "demand",
                        &format!("path references unknown edge {edge}"),
                        &name,
                    );
                }
            }
        }
        if let (true, Some(topology)) = (known, topology.as_ref()) {
            if let Err(err) = edge_path_to_vertices(topology, &demand.paths[0], None) {
                diag.add_error_with_entity(
                    "demand",
                    &format!("primary path is not a walk: {err}"),
                    &name,
                );
            }
        }
    }

    diag
}
