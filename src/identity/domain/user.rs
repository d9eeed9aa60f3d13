//! User aggregate and credential scalar types.

use super::{IdentityDomainError, Role, UserId};
use crate::comment::domain::Comment;
use crate::task::domain::{Task, TaskAssignment};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated email address used for login and uniqueness checks.
///
/// Matching is case-sensitive and exact; normalization is limited to
/// trimming surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidEmail`] when the trimmed value
    /// is empty or lacks an `@` separator with text on both sides.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        let is_valid = trimmed
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if !is_valid {
            return Err(IdentityDomainError::InvalidEmail(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque one-way password hash.
///
/// The domain never inspects hash contents; construction and verification
/// live behind the hashing port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps an already-computed hash string.
    #[must_use]
    pub const fn from_hash(hash: String) -> Self {
        Self(hash)
    }

    /// Returns the stored hash as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Creation payload for a user record.
///
/// Carries the raw password; the service hashes it before the aggregate is
/// built, so plain credentials never reach a repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login email, unique across non-deleted users.
    pub email: EmailAddress,
    /// Raw password to be hashed by the directory service.
    pub password: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Optional avatar location.
    pub avatar_url: Option<String>,
}

/// Partial update for a user record; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    /// Replacement email, re-checked for uniqueness.
    pub email: Option<EmailAddress>,
    /// Replacement raw password, re-hashed before persisting.
    pub password: Option<String>,
    /// Replacement given name.
    pub first_name: Option<String>,
    /// Replacement family name.
    pub last_name: Option<String>,
    /// Replacement avatar location.
    pub avatar_url: Option<String>,
    /// Replacement active flag.
    pub is_active: Option<bool>,
}

/// Conjunctive filters for user listing.
#[derive(Debug, Clone, Default)]
pub struct UserFilters {
    /// Exact match on the active flag.
    pub is_active: Option<bool>,
    /// Case-insensitive substring match over first name, last name, and
    /// email.
    pub search: Option<String>,
}

/// User aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    password_hash: PasswordHash,
    first_name: String,
    last_name: String,
    avatar_url: Option<String>,
    is_active: bool,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted user aggregate.
#[derive(Debug, Clone)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted password hash.
    pub password_hash: PasswordHash,
    /// Persisted given name.
    pub first_name: String,
    /// Persisted family name.
    pub last_name: String,
    /// Persisted avatar location, if any.
    pub avatar_url: Option<String>,
    /// Persisted active flag.
    pub is_active: bool,
    /// Persisted last-login timestamp, if any.
    pub last_login_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted soft-deletion timestamp, if any.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new active user with an already-hashed password.
    #[must_use]
    pub fn new(draft: &NewUser, password_hash: PasswordHash, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: UserId::new(),
            email: draft.email.clone(),
            password_hash,
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            avatar_url: draft.avatar_url.clone(),
            is_active: true,
            last_login_at: None,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            email: data.email,
            password_hash: data.password_hash,
            first_name: data.first_name,
            last_name: data.last_name,
            avatar_url: data.avatar_url,
            is_active: data.is_active,
            last_login_at: data.last_login_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the login email.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the stored password hash.
    #[must_use]
    pub const fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Returns the given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the avatar location, if any.
    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    /// Returns the active flag.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the last-login timestamp, if any.
    #[must_use]
    pub const fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the soft-deletion timestamp, if any.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns `true` when the user has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Applies a partial update; the password field is handled by the
    /// service, which re-hashes before calling [`User::set_password_hash`].
    pub fn apply(&mut self, patch: &UserPatch, clock: &impl Clock) {
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(first_name) = &patch.first_name {
            self.first_name = first_name.clone();
        }
        if let Some(last_name) = &patch.last_name {
            self.last_name = last_name.clone();
        }
        if let Some(avatar_url) = &patch.avatar_url {
            self.avatar_url = Some(avatar_url.clone());
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        self.touch(clock);
    }

    /// Replaces the stored password hash.
    pub fn set_password_hash(&mut self, hash: PasswordHash, clock: &impl Clock) {
        self.password_hash = hash;
        self.touch(clock);
    }

    /// Stamps the last-login timestamp with the current clock time.
    ///
    /// Last-write-wins; no read-modify-write protection is required.
    pub fn record_login(&mut self, clock: &impl Clock) {
        self.last_login_at = Some(clock.utc());
    }

    /// Soft-deletes the user by stamping the deletion timestamp.
    pub fn mark_deleted(&mut self, clock: &impl Clock) {
        let timestamp = clock.utc();
        self.deleted_at = Some(timestamp);
        self.updated_at = timestamp;
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Read shape pairing a user with their attached roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithRoles {
    /// The user record.
    pub user: User,
    /// Roles currently assigned to the user.
    pub roles: Vec<Role>,
}

/// Full detail read shape for a single user: roles plus the task and
/// comment records tied to the account. Associations exclude soft-deleted
/// rows; tasks and comments order newest-created first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// The user record.
    pub user: User,
    /// Roles currently assigned to the user.
    pub roles: Vec<Role>,
    /// Tasks the user created.
    pub created_tasks: Vec<Task>,
    /// Active assignment rows pointing at the user.
    pub assignments: Vec<TaskAssignment>,
    /// Comments the user authored.
    pub comments: Vec<Comment>,
}
