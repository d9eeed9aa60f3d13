//! Port contracts for identity persistence and credential hashing.

pub mod hasher;
pub mod repository;

pub use hasher::{PasswordHashError, PasswordHasher};
pub use repository::{
    RoleRepository, RoleRepositoryError, RoleRepositoryResult, UserRepository,
    UserRepositoryError, UserRepositoryResult,
};
