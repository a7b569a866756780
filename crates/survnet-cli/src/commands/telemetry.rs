use std::{env, path::Path, time::Instant};
use survnet_io::{write_manifest, Param, RunManifest, RunTelemetry};

const TELEMETRY_ENV_KEYS: &[&str] = &[
    "SURVNET_ENV",
    "GITHUB_RUN_ID",
    "GITHUB_WORKFLOW",
    "GITHUB_SHA",
];

fn collect_telemetry_env() -> Vec<Param> {
    TELEMETRY_ENV_KEYS
        .iter()
        .filter_map(|key| {
            env::var(key).ok().map(|value| Param {
                name: key.to_string(),
                value,
            })
        })
        .collect()
}

/// Write a run manifest next to `out`; failures are reported, never fatal.
pub fn record_run_timed(
    out: &Path,
    command: &str,
    params: &[(&str, &str)],
    start: Instant,
    result: &anyhow::Result<()>,
) {
    let telemetry = RunTelemetry {
        status: if result.is_ok() { "success" } else { "failure" }.to_string(),
        duration_ms: Some(start.elapsed().as_millis()),
        env: collect_telemetry_env(),
    };
    let manifest = RunManifest::new(
        command,
        env!("CARGO_PKG_VERSION"),
        out,
        params,
        telemetry,
    );
    match write_manifest(out, &manifest) {
        Ok(path) => println!("Recorded run manifest {}", path.display()),
        Err(err) => eprintln!("Failed to record run manifest: {err}"),
    }
}
