//! Persistence adapters for tasks and their relation sets.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryTaskRepository;
pub use postgres::PostgresTaskRepository;
