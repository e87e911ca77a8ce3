//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    App(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::App(e) => match e {
                ApplicationError::Domain(DomainError::RootDeletion(_)) => crate::exitcode::USAGE,
                ApplicationError::Infra(InfraError::Io { .. }) => crate::exitcode::IOERR,
                ApplicationError::Infra(InfraError::NoDataDir) => crate::exitcode::CONFIG,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::Serialize(_) => crate::exitcode::SOFTWARE,
            },
        }
    }
}
