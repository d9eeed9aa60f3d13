//! Adapter implementations for identity ports.

pub mod bcrypt;
pub mod memory;
pub mod postgres;

pub use bcrypt::BcryptPasswordHasher;
pub use memory::{InMemoryRoleRepository, InMemoryUserRepository};
pub use postgres::{PostgresRoleRepository, PostgresUserRepository};
