//! Error types for comment domain validation.

use thiserror::Error;

/// Errors returned while constructing comment domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommentDomainError {
    /// The comment content is empty after trimming.
    #[error("comment content must not be empty")]
    EmptyContent,
}
