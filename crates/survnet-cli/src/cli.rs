use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Two-layer network survivability analysis", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Failure scenario enumeration
    Cuts {
        #[command(subcommand)]
        command: CutsCommands,
    },
    /// Enumerate scenarios, evaluate demands, and report survivability
    Analyze {
        /// Study file (YAML or JSON)
        #[arg(long)]
        study: PathBuf,
        /// Results JSON output path
        #[arg(short, long)]
        out: PathBuf,
        /// Threading hint (`auto` or integer)
        #[arg(long, default_value = "auto")]
        threads: String,
        /// Override the study's capacity release policy
        #[arg(long, value_enum)]
        release: Option<ReleaseArg>,
    },
    /// Turn an edge path into the vertex sequence it walks
    Path {
        /// Study file providing the topology
        #[arg(long)]
        study: PathBuf,
        /// Comma-separated edge ids, e.g. `0,1,2`
        #[arg(long, value_delimiter = ',', required = true)]
        edges: Vec<usize>,
        /// Vertex the walk starts from
        #[arg(long)]
        start: Option<usize>,
    },
    /// Topology statistics and study validation
    Inspect {
        /// Study file (YAML or JSON)
        #[arg(long)]
        study: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum CutsCommands {
    /// Low-layer cuts mapped onto high-layer edges
    Multilayer {
        #[arg(long)]
        study: PathBuf,
        /// Write the scenario set as JSON
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Double cuts within one layer; entity indices are edge ids
    Inlayer {
        #[arg(long)]
        study: PathBuf,
        /// Write the scenario set as JSON
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReleaseArg {
    /// One release per disrupted path
    PerPath,
    /// One release per failed edge on the disrupted path
    PerFailedEdge,
}

impl ReleaseArg {
    pub fn policy(self) -> survnet_algo::CapacityRelease {
        match self {
            ReleaseArg::PerPath => survnet_algo::CapacityRelease::PerPath,
            ReleaseArg::PerFailedEdge => survnet_algo::CapacityRelease::PerFailedEdge,
        }
    }
}
