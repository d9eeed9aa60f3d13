//! Error types for taxonomy domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing taxonomy domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxonomyDomainError {
    /// The category or project name is empty after trimming.
    #[error("{0} must not be empty")]
    EmptyName(&'static str),
}

/// Error returned while parsing project statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project status: {0}")]
pub struct ParseProjectStatusError(pub String);
