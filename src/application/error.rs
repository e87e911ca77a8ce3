//! Application-level errors (wraps domain and infrastructure errors)

use thiserror::Error;

use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// Application errors wrap lower layers and add use-case context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("cannot serialize tree snapshot: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
