use serde::Deserialize;
use serde_json::json;

use inmokit_auth::{PublicUser, RoleGrants};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
    pub role_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub display_name: Option<String>,
    pub password: Option<String>,
    pub role_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePermissionRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SetPermissionsRequest {
    pub permission_ids: Vec<i64>,
}

// -------------------------
// Response mapping
// -------------------------

/// Profile JSON. Built from the hash-free view only.
pub fn user_to_json(user: &PublicUser) -> serde_json::Value {
    json!({
        "id": user.id,
        "email": &user.identifier,
        "display_name": &user.display_name,
        "role_id": user.role_id,
    })
}

pub fn role_to_json(grants: &RoleGrants) -> serde_json::Value {
    json!({
        "id": grants.id,
        "name": &grants.name,
        "permissions": &grants.permission_names,
    })
}
