use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use serde_json::json;

use inmokit_auth::Registration;
use inmokit_core::{CoreError, RoleId};

use crate::app::{dto, errors, services::AppServices};
use crate::context::Caller;

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterRequest>,
) -> axum::response::Response {
    let registration = Registration {
        identifier: body.email,
        secret: body.password,
        display_name: body.display_name,
        role_id: RoleId::new(body.role_id),
    };

    match services.authenticator.register(registration) {
        Ok(user) => (
            StatusCode::CREATED,
            Json(json!({ "user": dto::user_to_json(&user) })),
        )
            .into_response(),
        Err(e) => errors::core_error_response(&e),
    }
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    match services.authenticator.login(&body.email, &body.password) {
        Ok(outcome) => (
            StatusCode::OK,
            Json(json!({
                "access_token": outcome.token,
                "user": dto::user_to_json(&outcome.user),
            })),
        )
            .into_response(),
        Err(e) => errors::core_error_response(&e),
    }
}

pub async fn me(Extension(caller): Extension<Caller>) -> axum::response::Response {
    match caller.claim() {
        Some(claim) => (
            StatusCode::OK,
            Json(json!({
                "id": claim.subject_id,
                "email": &claim.identifier,
                "role_id": claim.role_id,
            })),
        )
            .into_response(),
        None => errors::core_error_response(&CoreError::Unauthorized),
    }
}
