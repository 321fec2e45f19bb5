//! Directory adapter contract.
//!
//! The directory is the external read interface onto user/role/permission
//! storage. The core treats it as a collaborator: one lookup at login, one
//! role/permission resolution per access decision, and the handful of
//! maintenance operations the management surface needs. Implementations own
//! their internal consistency; `replace_role_permissions` in particular must
//! be atomic (readers observe the old complete set or the new complete set,
//! never a partially-cleared state).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use inmokit_core::{PermissionId, RoleId, UserId};

/// A stored user row, including the secret hash.
///
/// This type stays inside the core; anything returned to callers goes
/// through a profile view that excludes `secret_hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub identifier: String,
    pub secret_hash: String,
    pub display_name: Option<String>,
    pub role_id: RoleId,
}

/// Input for creating a user. The secret has already been hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub identifier: String,
    pub secret_hash: String,
    pub display_name: Option<String>,
    pub role_id: RoleId,
}

/// Partial update of a user record. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub display_name: Option<String>,
    pub secret_hash: Option<String>,
    pub role_id: Option<RoleId>,
}

/// A role row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub id: RoleId,
    pub name: String,
}

/// A permission row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRecord {
    pub id: PermissionId,
    pub name: String,
}

/// A role resolved together with its effective permission-name set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGrants {
    pub id: RoleId,
    pub name: String,
    pub permission_names: BTreeSet<String>,
}

/// Storage-level failure. The authenticator and the management layer map
/// these to the boundary taxonomy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

impl From<DirectoryError> for inmokit_core::CoreError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::Conflict(msg) => Self::Conflict(msg),
            DirectoryError::NotFound(msg) => Self::NotFound(msg),
            DirectoryError::Storage(msg) => {
                tracing::error!(error = %msg, "directory storage failure");
                Self::Internal
            }
        }
    }
}

/// Read-mostly user/role/permission directory.
///
/// Object-safe so the core can hold it as `Arc<dyn Directory>`.
pub trait Directory: Send + Sync {
    fn find_user_by_identifier(&self, identifier: &str) -> DirectoryResult<Option<UserRecord>>;

    fn find_user_by_id(&self, id: UserId) -> DirectoryResult<Option<UserRecord>>;

    /// Resolve a role together with the permission names reachable through
    /// its role-permission edges.
    fn find_role_with_permissions(&self, role_id: RoleId) -> DirectoryResult<Option<RoleGrants>>;

    /// Atomically replace a role's full permission set.
    ///
    /// Delete-then-recreate of the edges is the only supported "set
    /// permissions" operation; there is no incremental variant.
    fn replace_role_permissions(
        &self,
        role_id: RoleId,
        permission_ids: Vec<PermissionId>,
    ) -> DirectoryResult<()>;

    /// Persist a new user. Fails with [`DirectoryError::Conflict`] when the
    /// identifier is already taken.
    fn create_user(&self, user: NewUser) -> DirectoryResult<UserRecord>;

    fn list_users(&self) -> DirectoryResult<Vec<UserRecord>>;

    fn update_user(&self, id: UserId, update: UserUpdate) -> DirectoryResult<UserRecord>;

    fn create_role(&self, name: &str) -> DirectoryResult<RoleRecord>;

    fn list_roles(&self) -> DirectoryResult<Vec<RoleRecord>>;

    fn create_permission(&self, name: &str) -> DirectoryResult<PermissionRecord>;

    fn list_permissions(&self) -> DirectoryResult<Vec<PermissionRecord>>;
}
