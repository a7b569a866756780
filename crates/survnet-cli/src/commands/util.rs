use anyhow::{Context, Result};
use rayon::ThreadPoolBuilder;
use std::path::Path;
use survnet_io::{load_study_from_path, resolve_study, ResolvedStudy};

pub fn configure_threads(spec: &str) {
    let count = if spec.eq_ignore_ascii_case("auto") {
        num_cpus::get()
    } else {
        spec.parse().unwrap_or_else(|_| num_cpus::get())
    };
    let _ = ThreadPoolBuilder::new().num_threads(count).build_global();
}

/// Load, validate and resolve a study file.
pub fn load_resolved(path: &Path) -> Result<ResolvedStudy> {
    let spec = load_study_from_path(path)?;
    resolve_study(&spec).with_context(|| format!("resolving study '{}'", path.display()))
}

pub fn join_ids(ids: &[usize]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
