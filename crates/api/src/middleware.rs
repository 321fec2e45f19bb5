//! Guard middleware: one pipeline invocation per request.

use std::sync::Arc;

use axum::{
    extract::{MatchedPath, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use inmokit_auth::{AccessRequirement, GuardPipeline};

use crate::app::errors;
use crate::context::Caller;
use crate::table::RouteTable;

#[derive(Clone)]
pub struct GuardState {
    pub pipeline: Arc<GuardPipeline>,
    pub table: Arc<RouteTable>,
}

/// Resolve the matched operation's declaration and run the guard pipeline
/// (exemption → authentication → access decision) exactly once.
pub async fn guard_middleware(
    State(state): State<GuardState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(matched) = req.extensions().get::<MatchedPath>().cloned() else {
        // No route matched; let the router produce its 404.
        return next.run(req).await;
    };

    let spec = state.table.lookup(req.method(), matched.as_str());

    // A routable operation missing from the table denies by default:
    // authentication required, no exemption.
    let fallback = AccessRequirement::none();
    let (controller, operation, requirement) = match spec {
        Some(spec) => (spec.controller, spec.name, &spec.access),
        None => {
            tracing::warn!(path = matched.as_str(), "operation not declared in route table");
            ("undeclared", "undeclared", &fallback)
        }
    };

    let bearer = bearer_token(req.headers());

    match state
        .pipeline
        .authorize(controller, operation, requirement, bearer)
    {
        Ok(identity) => {
            req.extensions_mut().insert(Caller(identity));
            next.run(req).await
        }
        Err(e) => errors::core_error_response(&e),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::AUTHORIZATION;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(
            bearer_token(&headers("Bearer abc.def.ghi")),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
