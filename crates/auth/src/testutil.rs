//! Minimal directory stub for unit tests in this crate.
//!
//! The real in-memory directory lives in `inmokit-infra`; this stub only
//! covers the lookups the core itself exercises, and fails loudly for the
//! maintenance operations it does not.

use std::sync::Mutex;

use inmokit_core::{PermissionId, RoleId, UserId};

use crate::directory::{
    Directory, DirectoryError, DirectoryResult, NewUser, PermissionRecord, RoleGrants, RoleRecord,
    UserRecord, UserUpdate,
};

#[derive(Default)]
pub(crate) struct StaticDirectory {
    users: Mutex<Vec<UserRecord>>,
    roles: Mutex<Vec<RoleGrants>>,
}

impl StaticDirectory {
    /// Insert a user with a real (low-cost) bcrypt hash of `secret`.
    pub fn insert_user(&self, identifier: &str, secret: &str, role_id: RoleId) -> UserRecord {
        // Lowest bcrypt cost: these hashes only need to verify, not resist.
        let secret_hash = bcrypt::hash(secret, 4).unwrap();
        let mut users = self.users.lock().unwrap();
        let record = UserRecord {
            id: UserId::new(users.len() as i64 + 1),
            identifier: identifier.to_string(),
            secret_hash,
            display_name: None,
            role_id,
        };
        users.push(record.clone());
        record
    }

    pub fn insert_role(&self, grants: RoleGrants) {
        self.roles.lock().unwrap().push(grants);
    }

    fn unsupported<T>(op: &str) -> DirectoryResult<T> {
        Err(DirectoryError::Storage(format!(
            "{op} not supported by test stub"
        )))
    }
}

impl Directory for StaticDirectory {
    fn find_user_by_identifier(&self, identifier: &str) -> DirectoryResult<Option<UserRecord>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.identifier == identifier).cloned())
    }

    fn find_user_by_id(&self, id: UserId) -> DirectoryResult<Option<UserRecord>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    fn find_role_with_permissions(&self, role_id: RoleId) -> DirectoryResult<Option<RoleGrants>> {
        let roles = self.roles.lock().unwrap();
        Ok(roles.iter().find(|r| r.id == role_id).cloned())
    }

    fn replace_role_permissions(
        &self,
        _role_id: RoleId,
        _permission_ids: Vec<PermissionId>,
    ) -> DirectoryResult<()> {
        Self::unsupported("replace_role_permissions")
    }

    fn create_user(&self, user: NewUser) -> DirectoryResult<UserRecord> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.identifier == user.identifier) {
            return Err(DirectoryError::Conflict("identifier already taken".into()));
        }
        let record = UserRecord {
            id: UserId::new(users.len() as i64 + 1),
            identifier: user.identifier,
            secret_hash: user.secret_hash,
            display_name: user.display_name,
            role_id: user.role_id,
        };
        users.push(record.clone());
        Ok(record)
    }

    fn list_users(&self) -> DirectoryResult<Vec<UserRecord>> {
        Ok(self.users.lock().unwrap().clone())
    }

    fn update_user(&self, _id: UserId, _update: UserUpdate) -> DirectoryResult<UserRecord> {
        Self::unsupported("update_user")
    }

    fn create_role(&self, _name: &str) -> DirectoryResult<RoleRecord> {
        Self::unsupported("create_role")
    }

    fn list_roles(&self) -> DirectoryResult<Vec<RoleRecord>> {
        Self::unsupported("list_roles")
    }

    fn create_permission(&self, _name: &str) -> DirectoryResult<PermissionRecord> {
        Self::unsupported("create_permission")
    }

    fn list_permissions(&self) -> DirectoryResult<Vec<PermissionRecord>> {
        Self::unsupported("list_permissions")
    }
}
