//! Port contracts for task persistence.

pub mod repository;

pub use repository::{
    AssignmentReplacement, AssignmentScope, RelationReplacement, TaskRepository,
    TaskRepositoryError, TaskRepositoryResult,
};
