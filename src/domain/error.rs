//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent business rule violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("cannot delete the root person (id {0})")]
    RootDeletion(u64),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
