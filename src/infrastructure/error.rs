//! Infrastructure-level errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors from I/O boundary implementations.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot determine snapshot directory (no home directory found)")]
    NoDataDir,
}

/// Result type for infrastructure operations.
pub type InfraResult<T> = Result<T, InfraError>;
