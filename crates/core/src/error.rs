//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// The `Display` output of each variant is sent to clients verbatim inside
/// the `{"Err": ...}` envelope, so messages carry no prefix.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. non-positive paging fields).
    #[error("{0}")]
    Validation(String),

    /// The record key was empty or whitespace.
    #[error("email address is required")]
    MissingEmail,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
