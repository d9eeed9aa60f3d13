//! `PostgreSQL` adapters for identity persistence.

mod models;
mod role;
mod user;

pub use role::PostgresRoleRepository;
pub use user::PostgresUserRepository;
