use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use inmokit_core::{CoreError, PermissionId, RoleId};

use crate::app::{dto, errors, services::AppServices};

pub async fn list_roles(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let roles = match services.directory.list_roles() {
        Ok(roles) => roles,
        Err(e) => return errors::core_error_response(&CoreError::from(e)),
    };

    let mut items = Vec::with_capacity(roles.len());
    for role in roles {
        match services.directory.find_role_with_permissions(role.id) {
            Ok(Some(grants)) => items.push(dto::role_to_json(&grants)),
            // Deleted between the two reads; skip it.
            Ok(None) => continue,
            Err(e) => return errors::core_error_response(&CoreError::from(e)),
        }
    }

    (StatusCode::OK, Json(json!({ "items": items }))).into_response()
}

pub async fn create_role(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateRoleRequest>,
) -> axum::response::Response {
    match services.directory.create_role(&body.name) {
        Ok(role) => (
            StatusCode::CREATED,
            Json(json!({ "role": { "id": role.id, "name": role.name } })),
        )
            .into_response(),
        Err(e) => errors::core_error_response(&CoreError::from(e)),
    }
}

pub async fn get_role(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match services.directory.find_role_with_permissions(RoleId::new(id)) {
        Ok(Some(grants)) => {
            (StatusCode::OK, Json(json!({ "role": dto::role_to_json(&grants) }))).into_response()
        }
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "role not found"),
        Err(e) => errors::core_error_response(&CoreError::from(e)),
    }
}

/// Full replace of a role's permission set (no incremental variant).
pub async fn set_permissions(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
    Json(body): Json<dto::SetPermissionsRequest>,
) -> axum::response::Response {
    let role_id = RoleId::new(id);
    let permission_ids: Vec<PermissionId> = body
        .permission_ids
        .into_iter()
        .map(PermissionId::new)
        .collect();

    if let Err(e) = services
        .directory
        .replace_role_permissions(role_id, permission_ids)
    {
        return errors::core_error_response(&CoreError::from(e));
    }

    match services.directory.find_role_with_permissions(role_id) {
        Ok(Some(grants)) => {
            (StatusCode::OK, Json(json!({ "role": dto::role_to_json(&grants) }))).into_response()
        }
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "role not found"),
        Err(e) => errors::core_error_response(&CoreError::from(e)),
    }
}
