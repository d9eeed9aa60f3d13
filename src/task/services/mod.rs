//! Service layer for task commands and joined queries.

mod lifecycle;

pub use lifecycle::{TaskService, TaskServiceError, TaskServiceResult};
