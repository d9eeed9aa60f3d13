//! Error types for identity domain validation.

use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The email address is empty or missing an `@` separator.
    #[error("invalid email address: '{0}'")]
    InvalidEmail(String),

    /// A personal or role name is empty after trimming.
    #[error("{0} must not be empty")]
    EmptyName(&'static str),
}
