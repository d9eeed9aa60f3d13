//! Domain model for categories and projects.

mod category;
mod error;
mod ids;
mod project;

pub use category::{Category, CategoryPatch, PersistedCategoryData};
pub use error::{ParseProjectStatusError, TaxonomyDomainError};
pub use ids::{CategoryId, ProjectId};
pub use project::{PersistedProjectData, Project, ProjectDraft, ProjectPatch, ProjectStatus};
