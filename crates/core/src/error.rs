//! Shared error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures (validation, parse failures).
/// Service-specific outcomes (duplicate email, ownership violations, ...)
/// belong to the service crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

/// Storage port error.
///
/// These are infrastructure failures surfaced by the document-store ports, as
/// opposed to domain failures. Uniqueness conflicts get their own variant so
/// callers can map them to a distinguishable error instead of a generic
/// validation failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A unique constraint was violated (the offending field is named).
    #[error("unique constraint violated: {0}")]
    Conflict(String),

    /// The addressed document does not exist.
    #[error("document not found")]
    NotFound,

    /// The store could not serve the request (transient/unexpected).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn conflict(field: impl Into<String>) -> Self {
        Self::Conflict(field.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}
