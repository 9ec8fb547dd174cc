use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TodoApiError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("runtime error: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, TodoApiError>;

/// Single error-to-response mapping shared by every handler. Clients get
/// the short message for their own mistakes; storage and runtime faults
/// are logged here and reported as a fixed 500 with no internals attached.
impl IntoResponse for TodoApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            TodoApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            TodoApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            TodoApiError::Config(msg) | TodoApiError::Storage(msg) | TodoApiError::Runtime(msg) => {
                tracing::error!(error = %msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_variant_prefix() {
        let err = TodoApiError::Config("missing uri".to_string());
        assert!(format!("{err}").contains("configuration error"));
        let err = TodoApiError::Validation("title".to_string());
        assert!(format!("{err}").contains("validation error"));
    }

    #[test]
    fn maps_variants_to_statuses() {
        let resp = TodoApiError::NotFound("task not found".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let resp = TodoApiError::Validation("bad title".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = TodoApiError::Storage("mongo down".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
