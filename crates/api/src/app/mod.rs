//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: shared service handles injected into handlers
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};

use inmokit_auth::{AccessEngine, AuthConfig, Authenticator, Directory, GuardPipeline};
use inmokit_infra::MemoryDirectory;

use crate::middleware::{self, GuardState};
use crate::table::RouteTable;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router against the seeded in-memory directory
/// (public entrypoint used by `main.rs`).
pub fn build_app(config: AuthConfig) -> Router {
    build_app_with_directory(config, Arc::new(MemoryDirectory::seeded()))
}

/// Build the router against an explicit directory implementation.
pub fn build_app_with_directory(config: AuthConfig, directory: Arc<dyn Directory>) -> Router {
    let authenticator = Arc::new(Authenticator::new(directory.clone(), &config));
    let engine = AccessEngine::new(directory.clone());

    let table = Arc::new(RouteTable::standard());
    let pipeline = Arc::new(GuardPipeline::new(
        table.exemption_registry(),
        authenticator.clone(),
        engine,
    ));

    let services = Arc::new(services::AppServices {
        authenticator,
        directory,
    });

    let guard = GuardState { pipeline, table };

    routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            guard,
            middleware::guard_middleware,
        ))
}
