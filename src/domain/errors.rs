//! Domain error types
//!
//! This module defines the error hierarchy for docker-save. Errors raised by
//! an export driver are kept in their own enum and wrapped by the top-level
//! [`DockerSaveError`] so callers can tell a rejected artifact, an unwritable
//! destination and a failed save apart.

use std::path::PathBuf;
use thiserror::Error;

/// Main docker-save error type
///
/// This is the primary error type used throughout the crate.
#[derive(Debug, Error)]
pub enum DockerSaveError {
    /// The artifact was produced by a stage this one cannot save from
    #[error("Unknown artifact type: {0}\nCan only save Docker builder artifacts.")]
    Provenance(String),

    /// The destination archive could not be created
    #[error("Error creating output file {}: {source}", path.display())]
    OutputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The export driver failed; the partial archive has already been removed
    #[error("Export error: {0}")]
    Export(#[from] DriverError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl DockerSaveError {
    /// Process exit code the CLI reports for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            DockerSaveError::Configuration(_) | DockerSaveError::Validation(_) => 2,
            DockerSaveError::Provenance(_) => 3,
            DockerSaveError::OutputFile { .. } => 4,
            DockerSaveError::Export(DriverError::Cancelled) => 130,
            DockerSaveError::Export(_) | DockerSaveError::Io(_) => 5,
        }
    }

    /// Whether the failure was caused by a shutdown signal
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DockerSaveError::Export(DriverError::Cancelled))
    }
}

/// Export driver errors
///
/// Errors raised while serializing an image into the archive sink.
/// These errors don't expose process or runtime handles.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The image runtime binary could not be started
    #[error("Failed to start '{executable}': {message}")]
    Spawn { executable: String, message: String },

    /// The image runtime exited unsuccessfully
    #[error("Error exporting: {status}\nStderr: {stderr}")]
    CommandFailed { status: String, stderr: String },

    /// Reading the image stream or writing the sink failed
    #[error("Failed to write image stream: {0}")]
    Io(String),

    /// The save was aborted by a shutdown signal
    #[error("Save cancelled by shutdown signal")]
    Cancelled,

    /// Driver-specific failure
    #[error("{0}")]
    Other(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for DockerSaveError {
    fn from(err: std::io::Error) -> Self {
        DockerSaveError::Io(err.to_string())
    }
}

impl From<std::io::Error> for DriverError {
    fn from(err: std::io::Error) -> Self {
        DriverError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for DockerSaveError {
    fn from(err: toml::de::Error) -> Self {
        DockerSaveError::Configuration(format!("TOML parse error: {err}"))
    }
}
