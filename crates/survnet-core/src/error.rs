//! Unified error types for the survnet workspace
//!
//! [`SurvError`] is the one error enum shared by every crate. The analysis core
//! only raises the structural variants (an edge sequence that is not a walk,
//! an unknown edge id, a demand with no primary path); everything else comes
//! from ingestion and the command line.
//!
//! # Example
//!
//! ```ignore
//! use survnet_core::{SurvError, SurvResult};
//!
//! fn endpoints_of(study: &Study) -> SurvResult<Vec<(usize, usize)>> {
//!     let topology = study.build_topology()?;
//!     compute_sides(&topology, &study.demands())
//! }
//! ```

use thiserror::Error;

/// Unified error type for all survnet operations.
#[derive(Error, Debug)]
pub enum SurvError {
    /// An edge sequence is not a contiguous walk in the topology.
    #[error("Discontinuous path: edge {edge} does not touch vertex {vertex}")]
    DiscontinuousPath { edge: usize, vertex: usize },

    /// An edge path with no edges was handed to path geometry.
    #[error("Empty edge path")]
    EmptyPath,

    /// A single-edge path whose only edge is a self loop has no orientation.
    #[error("Edge {0} is a self loop; path orientation is undefined")]
    SelfLoopPath(usize),

    /// An edge id that is not part of the topology.
    #[error("Unknown edge id {0}")]
    UnknownEdge(usize),

    /// A demand without any candidate path has no endpoints.
    #[error("Demand {0} has no primary path")]
    MissingPrimaryPath(usize),

    /// I/O errors (file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Input catalogue validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using SurvError.
pub type SurvResult<T> = Result<T, SurvError>;

impl SurvError {
    /// True for errors caused by the shape of a path or demand rather than by I/O.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            SurvError::DiscontinuousPath { .. }
                | SurvError::EmptyPath
                | SurvError::SelfLoopPath(_)
                | SurvError::UnknownEdge(_)
                | SurvError::MissingPrimaryPath(_)
        )
    }
}

impl From<anyhow::Error> for SurvError {
    fn from(err: anyhow::Error) -> Self {
        SurvError::Other(err.to_string())
    }
}

impl From<String> for SurvError {
    fn from(s: String) -> Self {
        SurvError::Other(s)
    }
}

impl From<&str> for SurvError {
    fn from(s: &str) -> Self {
        SurvError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for SurvError {
    fn from(err: serde_json::Error) -> Self {
        SurvError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discontinuous_display() {
        let err = SurvError::DiscontinuousPath { edge: 4, vertex: 2 };
        assert!(err.to_string().contains("Discontinuous path"));
        assert!(err.to_string().contains("edge 4"));
        assert!(err.is_structural());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "study not found");
        let err: SurvError = io_err.into();
        assert!(matches!(err, SurvError::Io(_)));
        assert!(!err.is_structural());
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> SurvResult<()> {
            Err(SurvError::EmptyPath)
        }

        fn outer() -> SurvResult<()> {
            inner()?;
            Ok(())
        }

        assert!(matches!(outer(), Err(SurvError::EmptyPath)));
    }
}
