use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use inmokit_core::CoreError;

/// Map a boundary error to its HTTP response.
pub fn core_error_response(err: &CoreError) -> axum::response::Response {
    let (status, code) = match err {
        CoreError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
        CoreError::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
        CoreError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
        CoreError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
        CoreError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
        CoreError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    };
    json_error(status, code, err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_matches_taxonomy() {
        let cases = [
            (CoreError::Unauthorized, StatusCode::UNAUTHORIZED),
            (CoreError::Forbidden, StatusCode::FORBIDDEN),
            (CoreError::conflict("x"), StatusCode::CONFLICT),
            (CoreError::not_found("x"), StatusCode::NOT_FOUND),
            (CoreError::validation("x"), StatusCode::BAD_REQUEST),
            (CoreError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(core_error_response(&err).status(), status);
        }
    }
}
