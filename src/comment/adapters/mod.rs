//! Persistence adapters for comment threads.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCommentRepository;
pub use postgres::PostgresCommentRepository;
