//! Port contracts for taxonomy persistence.

pub mod repository;

pub use repository::{
    CategoryRepository, CategoryRepositoryError, CategoryRepositoryResult, ProjectRepository,
    ProjectRepositoryError, ProjectRepositoryResult,
};
