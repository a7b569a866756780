use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub value: String,
}

/// Outcome of the run the manifest describes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunTelemetry {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,
    #[serde(default)]
    pub env: Vec<Param>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: String,
    pub command: String,
    pub version: String,
    pub timestamp: String,
    pub outputs: Vec<String>,
    pub params: Vec<Param>,
    pub telemetry: RunTelemetry,
}

impl RunManifest {
    pub fn new(
        command: &str,
        version: &str,
        output: &Path,
        params: &[(&str, &str)],
        telemetry: RunTelemetry,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            command: command.to_string(),
            version: version.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            outputs: vec![output.display().to_string()],
            params: params
                .iter()
                .map(|(k, v)| Param {
                    name: k.to_string(),
                    value: v.to_string(),
                })
                .collect(),
            telemetry,
        }
    }
}

/// Write `run-<run_id>.json` next to `output` and return its path.
pub fn write_manifest(output: &Path, manifest: &RunManifest) -> Result<PathBuf> {
    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    fs::create_dir_all(&dir)
        .with_context(|| format!("creating manifest directory '{}'", dir.display()))?;
    let json = serde_json::to_string_pretty(manifest)?;
    let path = dir.join(format!("run-{}.json", manifest.run_id));
    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

pub fn read_manifest(path: &Path) -> Result<RunManifest> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading run manifest '{}'", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("parsing run manifest '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_and_reads_manifest() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("results.json");
        let manifest = RunManifest::new(
            "analyze",
            "0.1.0",
            &output,
            &[("study", "triangle.yaml"), ("release", "per_path")],
            RunTelemetry {
                status: "success".into(),
                duration_ms: Some(12),
                env: Vec::new(),
            },
        );
        let path = write_manifest(&output, &manifest).unwrap();
        assert!(path.starts_with(dir.path()));
        let parsed = read_manifest(&path).unwrap();
        assert_eq!(parsed.run_id, manifest.run_id);
        assert_eq!(parsed.params.len(), 2);
        assert_eq!(parsed.telemetry.status, "success");
    }
}
