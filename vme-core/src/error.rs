// ============================================================================
// vme-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Custom Error Types for vme-core
//
// This module defines the error types used throughout the vme-core library.
// Every error is terminal for the current invocation: the pipeline performs no
// retries and never recovers a partial result.
//
// KEY COMPONENTS:
// - CoreError: One variant per failing stage (probe, export, storage, input)
// - CoreResult: Type alias for Result<T, CoreError>
// - Helper functions for the probe-stage errors
//
// AI-ASSISTANT-INFO: Error handling for the vme-core library

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Custom error types for the vme-core library.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The external probe tool is missing, could not start, or exited non-zero.
    #[error("Probe execution failed: {0}")]
    ProbeExecution(String),

    /// The probe output was not valid JSON of the expected schema.
    #[error("Failed to parse probe output: {0}")]
    ProbeParse(String),

    #[error("Unsupported format: {0} (use 'json' or 'xml')")]
    UnsupportedFormat(String),

    #[error("Failed to serialize metadata: {0}")]
    Serialization(String),

    #[error("Failed to write output file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Authentication, network or transfer failure against the object store.
    #[error("Object store error: {0}")]
    ObjectStore(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Tag '{key}' is claimed by both '{first}' and '{second}'")]
    TaxonomyOverlap {
        key: String,
        first: String,
        second: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for vme-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Error for a command that could not be started at all.
pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    let cmd = cmd.into();
    if err.kind() == io::ErrorKind::NotFound {
        CoreError::ProbeExecution(format!("'{cmd}' not found; is it installed and on PATH?"))
    } else {
        CoreError::ProbeExecution(format!("failed to start '{cmd}': {err}"))
    }
}

/// Error for a command that ran but exited unsuccessfully.
pub fn command_failed_error(cmd: impl Into<String>, status: ExitStatus, stderr: &str) -> CoreError {
    let stderr = stderr.trim();
    let detail = if stderr.is_empty() {
        "no diagnostic output".to_string()
    } else {
        stderr.to_string()
    };
    CoreError::ProbeExecution(format!("'{}' exited with {}: {}", cmd.into(), status, detail))
}
