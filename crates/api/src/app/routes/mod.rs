//! HTTP routes + handlers, one file per area.
//!
//! Routes are registered with their full paths so the patterns here, in the
//! route table, and in `MatchedPath` are the same strings.

use axum::{
    Router,
    routing::{get, post, put},
};

pub mod auth;
pub mod permissions;
pub mod roles;
pub mod system;
pub mod users;

pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/users", get(users::list_users))
        .route("/users/:id", get(users::get_user).patch(users::update_user))
        .route("/roles", get(roles::list_roles).post(roles::create_role))
        .route("/roles/:id", get(roles::get_role))
        .route("/roles/:id/permissions", put(roles::set_permissions))
        .route(
            "/permissions",
            get(permissions::list_permissions).post(permissions::create_permission),
        )
}
