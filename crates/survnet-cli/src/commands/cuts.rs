use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use survnet_algo::{CutEnumerator, ScenarioSet};
use survnet_cli::cli::CutsCommands;
use tabwriter::TabWriter;
use tracing::info;

use crate::commands::util::{join_ids, load_resolved};

pub fn handle(command: &CutsCommands) -> Result<()> {
    match command {
        CutsCommands::Multilayer { study, out } => {
            let study = load_resolved(study)?;
            let enumerator = CutEnumerator::new(study.config.enumeration.clone());
            let set = enumerator.multilayer(&study.catalogue, &study.relation);
            info!(
                "Enumerated {} scenarios from {} low-layer cuts",
                set.len(),
                set.low_layer_cuts
            );
            print_scenarios(&set, "EDGES", |e| study.topology.link_label(e))?;
            if let Some(out) = out {
                write_scenarios(out, &set)?;
            }
            Ok(())
        }
        CutsCommands::Inlayer { study, out } => {
            let study = load_resolved(study)?;
            let set =
                CutEnumerator::new(study.config.enumeration.clone()).inlayer(&study.catalogue);
            info!("Enumerated {} in-layer double cuts", set.len());
            // In-layer scenarios name low-layer entities, not high-layer edges.
            print_scenarios(&set, "ENTITIES", |i| study.entity_label(i))?;
            if let Some(out) = out {
                write_scenarios(out, &set)?;
            }
            Ok(())
        }
    }
}

fn print_scenarios(
    set: &ScenarioSet,
    column: &str,
    label: impl Fn(usize) -> String,
) -> Result<()> {
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "#\t{column}\tLABELS\tPROBABILITY\tMULTIPLICITY\tORDER")?;
    for (g, scenario) in set.iter().enumerate() {
        let labels: Vec<String> = scenario.edges.iter().map(|&id| label(id)).collect();
        writeln!(
            writer,
            "{}\t{}\t{}\t{:.6e}\t{}\t{}",
            g,
            join_ids(&scenario.edges),
            labels.join(","),
            scenario.probability,
            scenario.multiplicity,
            scenario.min_order
        )?;
    }
    writer.flush()?;
    println!(
        "{} scenarios, total probability {:.6e}",
        set.len(),
        set.total_probability()
    );
    Ok(())
}

fn write_scenarios(path: &Path, set: &ScenarioSet) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating scenario file '{}'", path.display()))?;
    serde_json::to_writer_pretty(file, set)
        .with_context(|| format!("writing scenario file '{}'", path.display()))?;
    println!("Scenarios written to {}", path.display());
    Ok(())
}
