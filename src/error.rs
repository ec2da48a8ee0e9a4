//! Error taxonomy for ingestion runs.
//!
//! Only failures that compromise the artifact itself are errors. Token counting
//! and version lookup degrade through [`crate::domain::Outcome`] instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Configuration file {} not found", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Unsupported config extension for file {}", .0.display())]
    UnsupportedConfigFormat(PathBuf),

    #[error("Invalid config {}: {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("Repository '{0}' not found in configuration")]
    UnknownRepository(String),

    #[error("Ingestion command `{command}` failed ({status}): {stderr}")]
    ExternalCommandFailure { command: String, status: String, stderr: String },

    #[error("{} is not valid UTF-8 (looks like {detected})", .path.display())]
    Encoding { path: PathBuf, detected: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = IngestError> = std::result::Result<T, E>;
