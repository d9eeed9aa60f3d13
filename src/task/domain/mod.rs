//! Domain model for tasks and task assignments.
//!
//! The task domain validates its own scalars (non-empty titles, the 1–5
//! priority band), models assignment rows as independently soft-deletable
//! records, and computes field-level change sets for the audit history while
//! keeping all infrastructure concerns outside of the domain boundary.

mod assignment;
mod changes;
mod details;
mod error;
mod ids;
mod task;

pub use assignment::{AssignmentStatus, PersistedAssignmentData, TaskAssignment};
pub use changes::{FieldChange, TaskChangeSet, TaskDraft};
pub use details::{AssignmentWithUser, TaskDetails, TaskWithRelations, UserSummary};
pub use error::{ParseAssignmentStatusError, ParseTaskStatusError, TaskDomainError};
pub use ids::{AssignmentId, TaskId};
pub use task::{PersistedTaskData, Priority, Task, TaskFilters, TaskStatus, TaskTitle};
