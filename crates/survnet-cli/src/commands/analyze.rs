use anyhow::Result;
use std::path::Path;
use std::time::Instant;
use survnet_algo::run_analysis;
use survnet_cli::cli::ReleaseArg;
use survnet_io::{write_results, StudyResults};
use tracing::info;

use crate::commands::telemetry::record_run_timed;
use crate::commands::util::{configure_threads, load_resolved};

pub fn handle(
    study: &Path,
    out: &Path,
    threads: &str,
    release: Option<ReleaseArg>,
) -> Result<()> {
    let start = Instant::now();
    let result = (|| -> Result<()> {
        configure_threads(threads);
        let mut resolved = load_resolved(study)?;
        if let Some(release) = release {
            resolved.config.impact.capacity_release = release.policy();
        }
        info!(
            "Analyzing '{}': {} edges, {} failure units, {} demands",
            resolved.name,
            resolved.topology.edge_count(),
            resolved.catalogue.len(),
            resolved.demands.len()
        );
        let outcome = run_analysis(&resolved.inputs(), &resolved.config)?;
        let results = StudyResults::from_outcome(
            &resolved.name,
            &resolved.topology,
            &resolved.demand_names,
            &outcome,
        );
        write_results(out, &results)?;
        println!("{}", outcome.metrics.summary());
        for (name, availability) in resolved
            .demand_names
            .iter()
            .zip(&outcome.metrics.demand_availability)
        {
            println!("  {name:<20} availability {availability:.6}");
        }
        println!("Results written to {}", out.display());
        Ok(())
    })();
    let release_label = release.map_or("study", |r| r.policy().as_str());
    let study_label = study.display().to_string();
    record_run_timed(
        out,
        "analyze",
        &[
            ("study", study_label.as_str()),
            ("threads", threads),
            ("release", release_label),
        ],
        start,
        &result,
    );
    result
}
