//! Study files in, analysis results out.
//!
//! - [`study`]: YAML/JSON study loading and conversion into analysis inputs
//! - [`validate`]: ingestion checks reported as diagnostics
//! - [`export`]: JSON result files
//! - [`manifest`]: per-run manifests written next to outputs

pub mod export;
pub mod manifest;
pub mod study;
pub mod validate;

pub use export::{load_results, write_results, DemandRecord, ScenarioRecord, StudyResults};
pub use manifest::{read_manifest, write_manifest, Param, RunManifest, RunTelemetry};
pub use study::{
    load_study_from_path, resolve_study, DemandSpec, EdgeSpec, EntitySpec, LowLayerSpec,
    ResolvedStudy, SrgSpec, StudyOptions, StudySpec, TopologySpec,
};
pub use validate::validate_study;
