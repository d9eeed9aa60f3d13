//! Service layer for category and project management.

mod categories;
mod projects;

pub use categories::{CategoryService, CategoryServiceError, CategoryServiceResult};
pub use projects::{ProjectService, ProjectServiceError, ProjectServiceResult};
