//! Domain model for users, roles, and role assignment.
//!
//! Identity types validate their own scalars (email shape, non-empty names)
//! and keep credential material opaque behind [`PasswordHash`].

mod error;
mod ids;
mod role;
mod user;

pub use error::IdentityDomainError;
pub use ids::{RoleId, UserId};
pub use role::{PersistedRoleData, Role, RoleAssignment, RoleFilters, RolePatch};
pub use user::{
    EmailAddress, NewUser, PasswordHash, PersistedUserData, User, UserFilters, UserPatch,
    UserProfile, UserWithRoles,
};
