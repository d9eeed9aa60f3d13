//! Bcrypt implementation of the password hashing port.

use crate::identity::domain::PasswordHash;
use crate::identity::ports::{PasswordHashError, PasswordHasher};

/// Cost-factor-tunable bcrypt hasher.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Default cost factor of 10 rounds.
    pub const DEFAULT_COST: u32 = 10;

    /// Creates a hasher with the given cost factor.
    #[must_use]
    pub const fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, raw: &str) -> Result<PasswordHash, PasswordHashError> {
        bcrypt::hash(raw, self.cost)
            .map(PasswordHash::from_hash)
            .map_err(PasswordHashError::new)
    }
}
