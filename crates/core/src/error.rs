//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// One variant per failure kind; the boundary layer maps each kind to a
/// user-facing status without inspecting messages. Keep this focused on
/// deterministic business/domain failures — transport concerns belong to the
/// caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A requested entity was absent for the given id or email.
    #[error("not found")]
    NotFound,

    /// An inventory item with the same (name, category) already exists.
    #[error("duplicate item: {0}")]
    DuplicateItem(String),

    /// The login email is already registered.
    #[error("duplicate email: {0}")]
    DuplicateEmail(String),

    /// A value failed validation (e.g. negative quantity, malformed input).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A foreign identifier did not resolve to an existing entity.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// An unexpected downstream fault (store I/O, partially applied write).
    #[error("internal failure: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn duplicate_item(msg: impl Into<String>) -> Self {
        Self::DuplicateItem(msg.into())
    }

    pub fn duplicate_email(msg: impl Into<String>) -> Self {
        Self::DuplicateEmail(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_reference(msg: impl Into<String>) -> Self {
        Self::InvalidReference(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
