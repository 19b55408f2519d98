use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::connectors::ConnectorError;

/// Request-level failures, rendered as `{"detail": "..."}`.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    ServiceUnavailable(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Translates a backend failure. `unavailable` is the operator-facing text used when the
    /// backend cannot be reached; every other failure carries the underlying message.
    pub fn from_backend(err: ConnectorError, unavailable: impl Into<String>) -> Self {
        match err {
            ConnectorError::Unreachable(_) => ApiError::ServiceUnavailable(unavailable.into()),
            other => ApiError::Internal(other.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "detail": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
