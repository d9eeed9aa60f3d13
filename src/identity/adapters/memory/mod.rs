//! In-memory repositories for identity tests.

mod role;
mod user;

pub use role::InMemoryRoleRepository;
pub use user::InMemoryUserRepository;

pub(crate) use crate::storage::memory::contains_ci;
