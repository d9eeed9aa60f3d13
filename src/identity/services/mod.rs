//! Service layer for user directory and role management.

mod directory;
mod roles;

pub use directory::{UserDirectoryError, UserDirectoryResult, UserDirectoryService};
pub use roles::{RoleService, RoleServiceError, RoleServiceResult};
