//! In-memory repositories for taxonomy tests.

mod category;
mod project;

pub use category::InMemoryCategoryRepository;
pub use project::InMemoryProjectRepository;
