//! Shared storage backends.
//!
//! Unlike fully isolated bounded contexts, the Taskhub entities form one
//! relational schema with cross-entity joins, so both adapter families sit
//! on shared backends:
//!
//! - [`memory`]: a thread-safe in-memory store used by tests and
//!   development setups without a database
//! - [`postgres`]: the Diesel schema and connection pool for `PostgreSQL`

pub mod memory;
pub mod postgres;

pub use memory::MemoryDb;
pub use postgres::{PgPool, build_pool};
