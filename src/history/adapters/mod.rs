//! Persistence adapters for the append-only audit history.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryHistoryRepository;
pub use postgres::PostgresHistoryRepository;
