//! Error types for alexnet-viz.
//!
//! Library lookups never fail: unknown stages are `None` and unknown sample
//! keys fall back to the default set. These errors only surface at the
//! command-line and configuration boundary.

use thiserror::Error;

/// Result type alias for alexnet-viz operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for alexnet-viz.
#[derive(Error, Debug)]
pub enum Error {
    /// Stage id outside `1..=9` requested from the command line.
    #[error("stage {0} not found (valid stages: 1-{max})", max = crate::model::TOTAL_STAGES)]
    StageNotFound(u32),

    /// Unknown demo name.
    #[error("unknown demo '{0}' (expected conv, pool, relu or features)")]
    UnknownDemo(String),

    /// Term missing from the glossary.
    #[error("no glossary entry for '{0}'")]
    UnknownTerm(String),

    /// Tracing was initialised twice.
    #[error("tracing has already been initialised")]
    TracingAlreadyInitialised,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
