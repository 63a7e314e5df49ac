use std::path::PathBuf;

use thiserror::Error;

/// Rejected velocity submissions. Round state is untouched in every case.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    #[error("invalid velocity '{input}': {reason}")]
    InvalidInput { input: String, reason: &'static str },
    #[error("a shot is still in flight; wait for it to finish")]
    Busy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Failure while replaying a frame onto a snapshot surface.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("drawing failed: {0}")]
    Draw(String),
    #[error("could not write snapshot {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
