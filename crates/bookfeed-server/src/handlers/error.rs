//! HTTP error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bookfeed_core::CoreError;

/// Boundary-level error: either an absence detected by a handler or a
/// core error propagated from a service. One mapping to status codes
/// lives here so handlers stay declarative.
#[derive(Debug)]
pub enum ApiError {
    NotFound(&'static str),
    Core(CoreError),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::Core(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            ApiError::Core(err) => match &err {
                CoreError::Reference { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                CoreError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
                CoreError::Storage(_) => {
                    tracing::error!("Storage failure: {}", err);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal server error".to_string(),
                    )
                }
            },
        };

        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}
