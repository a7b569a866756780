//! Study inspection: topology statistics, layer sizes and validation issues.

use anyhow::Result;
use std::path::Path;
use survnet_core::graph_utils;
use survnet_io::{load_study_from_path, validate_study};

pub fn handle(study: &Path) -> Result<()> {
    let spec = load_study_from_path(study)?;
    let diagnostics = validate_study(&spec);

    println!("Study '{}' ({}):", spec.display_name(), study.display());
    // Statistics need a buildable topology; validation explains why when it is not.
    match spec.build_topology() {
        Ok(topology) => {
            let stats = graph_utils::topology_stats(&topology);
            println!("  Vertices      : {}", stats.vertex_count);
            println!("  Edges         : {}", stats.edge_count);
            println!("  Components    : {}", stats.connected_components);
            println!(
                "  Degree [min/avg/max]: {}/{:.2}/{}",
                stats.min_degree, stats.avg_degree, stats.max_degree
            );
            println!("  Density       : {:.4}", stats.density);
            println!("  Parallel edges: {}", stats.parallel_edges);
            println!("  Self loops    : {}", stats.self_loops);
        }
        Err(err) => println!("  Topology      : unavailable ({err})"),
    }
    println!("  Entities      : {}", spec.low_layer.entities.len());
    println!("  SRGs          : {}", spec.low_layer.srgs.len());
    println!("  Demands       : {}", spec.demands.len());
    print!("{diagnostics}");
    Ok(())
}
