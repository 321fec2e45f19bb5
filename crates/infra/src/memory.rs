//! In-memory directory.
//!
//! Intended for tests/dev and as the reference implementation of the
//! directory contract. Not optimized for performance.

use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use inmokit_auth::directory::{
    Directory, DirectoryError, DirectoryResult, NewUser, PermissionRecord, RoleGrants, RoleRecord,
    UserRecord, UserUpdate,
};
use inmokit_core::{PermissionId, RoleId, UserId};

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<UserId, UserRecord>,
    roles: HashMap<RoleId, String>,
    permissions: HashMap<PermissionId, String>,
    // A role's full edge set is always replaced as one value, never edited
    // in place; readers under the same lock see old or new, nothing between.
    role_permissions: HashMap<RoleId, BTreeSet<PermissionId>>,
    next_user_id: i64,
    next_role_id: i64,
    next_permission_id: i64,
}

/// `RwLock`-protected directory backed by plain maps.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    inner: RwLock<Inner>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory pre-loaded with the deployment fixture: roles `Admin` and
    /// `User`, the four project permissions, and every permission granted
    /// to `Admin`.
    pub fn seeded() -> Self {
        let dir = Self::new();
        let admin = dir.create_role("Admin").expect("seed role");
        dir.create_role("User").expect("seed role");

        let perms: Vec<PermissionId> = [
            "CREATE_PROJECT",
            "EDIT_PROJECT",
            "VIEW_PROJECT",
            "DELETE_PROJECT",
        ]
        .iter()
        .map(|name| dir.create_permission(name).expect("seed permission").id)
        .collect();

        dir.replace_role_permissions(admin.id, perms)
            .expect("seed grants");
        dir
    }

    fn read(&self) -> DirectoryResult<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| DirectoryError::Storage("lock poisoned".to_string()))
    }

    fn write(&self) -> DirectoryResult<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| DirectoryError::Storage("lock poisoned".to_string()))
    }
}

impl Directory for MemoryDirectory {
    fn find_user_by_identifier(&self, identifier: &str) -> DirectoryResult<Option<UserRecord>> {
        let inner = self.read()?;
        Ok(inner
            .users
            .values()
            .find(|u| u.identifier == identifier)
            .cloned())
    }

    fn find_user_by_id(&self, id: UserId) -> DirectoryResult<Option<UserRecord>> {
        let inner = self.read()?;
        Ok(inner.users.get(&id).cloned())
    }

    fn find_role_with_permissions(&self, role_id: RoleId) -> DirectoryResult<Option<RoleGrants>> {
        let inner = self.read()?;
        let Some(name) = inner.roles.get(&role_id) else {
            return Ok(None);
        };

        let permission_names = inner
            .role_permissions
            .get(&role_id)
            .map(|edges| {
                edges
                    .iter()
                    .filter_map(|pid| inner.permissions.get(pid).cloned())
                    .collect::<BTreeSet<_>>()
            })
            .unwrap_or_default();

        Ok(Some(RoleGrants {
            id: role_id,
            name: name.clone(),
            permission_names,
        }))
    }

    fn replace_role_permissions(
        &self,
        role_id: RoleId,
        permission_ids: Vec<PermissionId>,
    ) -> DirectoryResult<()> {
        let mut inner = self.write()?;
        if !inner.roles.contains_key(&role_id) {
            return Err(DirectoryError::NotFound(format!("role {role_id}")));
        }
        for pid in &permission_ids {
            if !inner.permissions.contains_key(pid) {
                return Err(DirectoryError::NotFound(format!("permission {pid}")));
            }
        }

        // Build the new set first, then swap it in as one assignment while
        // still holding the write lock.
        let edges: BTreeSet<PermissionId> = permission_ids.into_iter().collect();
        inner.role_permissions.insert(role_id, edges);
        Ok(())
    }

    fn create_user(&self, user: NewUser) -> DirectoryResult<UserRecord> {
        let mut inner = self.write()?;
        if inner
            .users
            .values()
            .any(|u| u.identifier == user.identifier)
        {
            return Err(DirectoryError::Conflict(
                "identifier already registered".to_string(),
            ));
        }
        if !inner.roles.contains_key(&user.role_id) {
            return Err(DirectoryError::NotFound(format!("role {}", user.role_id)));
        }

        inner.next_user_id += 1;
        let record = UserRecord {
            id: UserId::new(inner.next_user_id),
            identifier: user.identifier,
            secret_hash: user.secret_hash,
            display_name: user.display_name,
            role_id: user.role_id,
        };
        inner.users.insert(record.id, record.clone());
        Ok(record)
    }

    fn list_users(&self) -> DirectoryResult<Vec<UserRecord>> {
        let inner = self.read()?;
        let mut users: Vec<UserRecord> = inner.users.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    fn update_user(&self, id: UserId, update: UserUpdate) -> DirectoryResult<UserRecord> {
        let mut inner = self.write()?;
        if let Some(role_id) = update.role_id {
            if !inner.roles.contains_key(&role_id) {
                return Err(DirectoryError::NotFound(format!("role {role_id}")));
            }
        }

        let user = inner
            .users
            .get_mut(&id)
            .ok_or_else(|| DirectoryError::NotFound(format!("user {id}")))?;

        if let Some(display_name) = update.display_name {
            user.display_name = Some(display_name);
        }
        if let Some(secret_hash) = update.secret_hash {
            user.secret_hash = secret_hash;
        }
        if let Some(role_id) = update.role_id {
            user.role_id = role_id;
        }
        Ok(user.clone())
    }

    fn create_role(&self, name: &str) -> DirectoryResult<RoleRecord> {
        let mut inner = self.write()?;
        if inner.roles.values().any(|n| n == name) {
            return Err(DirectoryError::Conflict("role already exists".to_string()));
        }

        inner.next_role_id += 1;
        let id = RoleId::new(inner.next_role_id);
        inner.roles.insert(id, name.to_string());
        Ok(RoleRecord {
            id,
            name: name.to_string(),
        })
    }

    fn list_roles(&self) -> DirectoryResult<Vec<RoleRecord>> {
        let inner = self.read()?;
        let mut roles: Vec<RoleRecord> = inner
            .roles
            .iter()
            .map(|(id, name)| RoleRecord {
                id: *id,
                name: name.clone(),
            })
            .collect();
        roles.sort_by_key(|r| r.id);
        Ok(roles)
    }

    fn create_permission(&self, name: &str) -> DirectoryResult<PermissionRecord> {
        let mut inner = self.write()?;
        if inner.permissions.values().any(|n| n == name) {
            return Err(DirectoryError::Conflict(
                "permission already exists".to_string(),
            ));
        }

        inner.next_permission_id += 1;
        let id = PermissionId::new(inner.next_permission_id);
        inner.permissions.insert(id, name.to_string());
        Ok(PermissionRecord {
            id,
            name: name.to_string(),
        })
    }

    fn list_permissions(&self) -> DirectoryResult<Vec<PermissionRecord>> {
        let inner = self.read()?;
        let mut permissions: Vec<PermissionRecord> = inner
            .permissions
            .iter()
            .map(|(id, name)| PermissionRecord {
                id: *id,
                name: name.clone(),
            })
            .collect();
        permissions.sort_by_key(|p| p.id);
        Ok(permissions)
    }
}
