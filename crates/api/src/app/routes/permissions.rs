use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use serde_json::json;

use inmokit_core::CoreError;

use crate::app::{dto, errors, services::AppServices};

pub async fn list_permissions(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.directory.list_permissions() {
        Ok(permissions) => {
            let items: Vec<_> = permissions
                .iter()
                .map(|p| json!({ "id": p.id, "name": p.name }))
                .collect();
            (StatusCode::OK, Json(json!({ "items": items }))).into_response()
        }
        Err(e) => errors::core_error_response(&CoreError::from(e)),
    }
}

pub async fn create_permission(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreatePermissionRequest>,
) -> axum::response::Response {
    match services.directory.create_permission(&body.name) {
        Ok(permission) => (
            StatusCode::CREATED,
            Json(json!({ "permission": { "id": permission.id, "name": permission.name } })),
        )
            .into_response(),
        Err(e) => errors::core_error_response(&CoreError::from(e)),
    }
}
