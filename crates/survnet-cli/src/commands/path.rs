use anyhow::{Context, Result};
use std::path::Path;
use survnet_core::edge_path_to_vertices;
use survnet_io::load_study_from_path;

use crate::commands::util::join_ids;

pub fn handle(study: &Path, edges: &[usize], start: Option<usize>) -> Result<()> {
    let spec = load_study_from_path(study)?;
    let topology = spec.build_topology()?;
    let vertices = edge_path_to_vertices(&topology, edges, start)
        .with_context(|| format!("walking edge path [{}]", join_ids(edges)))?;
    let labels: Vec<String> = vertices.iter().map(|&v| topology.vertex_label(v)).collect();
    println!("Vertices: {}", join_ids(&vertices));
    println!("Labels  : {}", labels.join(" -> "));
    Ok(())
}
