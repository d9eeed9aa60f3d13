//! Password hashing port.

use crate::identity::domain::PasswordHash;
use std::sync::Arc;
use thiserror::Error;

/// One-way password hashing contract.
///
/// Implementations are cost-factor tunable; the domain only ever sees the
/// opaque [`PasswordHash`] output.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a raw password.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError`] when the underlying algorithm fails.
    fn hash(&self, raw: &str) -> Result<PasswordHash, PasswordHashError>;
}

/// Failure from a password hashing implementation.
#[derive(Debug, Clone, Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordHashError(Arc<dyn std::error::Error + Send + Sync>);

impl PasswordHashError {
    /// Wraps an algorithm-level error.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
