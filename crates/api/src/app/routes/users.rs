use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use inmokit_auth::{PublicUser, UserUpdate, hasher};
use inmokit_core::{CoreError, RoleId, UserId};

use crate::app::{dto, errors, services::AppServices};

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.directory.list_users() {
        Ok(records) => {
            let items: Vec<_> = records
                .iter()
                .map(|r| dto::user_to_json(&PublicUser::from(r)))
                .collect();
            (StatusCode::OK, Json(json!({ "items": items }))).into_response()
        }
        Err(e) => errors::core_error_response(&CoreError::from(e)),
    }
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match services.directory.find_user_by_id(UserId::new(id)) {
        Ok(Some(record)) => (
            StatusCode::OK,
            Json(json!({ "user": dto::user_to_json(&PublicUser::from(&record)) })),
        )
            .into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
        Err(e) => errors::core_error_response(&CoreError::from(e)),
    }
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
    Json(body): Json<dto::UpdateUserRequest>,
) -> axum::response::Response {
    // Re-hash before touching the directory; the raw password stops here.
    let secret_hash = match body.password.as_deref() {
        Some(password) => match hasher::hash_secret(password) {
            Ok(hash) => Some(hash),
            Err(e) => return errors::core_error_response(&e),
        },
        None => None,
    };

    let update = UserUpdate {
        display_name: body.display_name,
        secret_hash,
        role_id: body.role_id.map(RoleId::new),
    };

    match services.directory.update_user(UserId::new(id), update) {
        Ok(record) => (
            StatusCode::OK,
            Json(json!({ "user": dto::user_to_json(&PublicUser::from(&record)) })),
        )
            .into_response(),
        Err(e) => errors::core_error_response(&CoreError::from(e)),
    }
}
