//! User-facing error responses.
//!
//! Every error leaves the service as `{"error": <message>, "path": <path>}`
//! with a status that tells the error kinds apart.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Errors a handler can report to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The service was taken offline.
    #[error("Not online")]
    NotOnline,
    /// No configuration has been published (or it was cleared).
    #[error("No configuration available")]
    MissingConfiguration,
    /// The administrative API key was missing or wrong.
    #[error("Missing or invalid API key")]
    Unauthorized,
    /// The request body could not be read as JSON.
    #[error("{0}")]
    UnsupportedPayload(String),
    /// The body parsed but its content is not acceptable.
    #[error("{0}")]
    Unprocessable(String),
    #[error("{0}")]
    NotFound(String),
    /// The name service was switched into failure mode.
    #[error("Name service is failing")]
    Failing,
    /// The handler did not finish within the request timeout.
    #[error("Request timed out")]
    Timeout,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotOnline => StatusCode::BAD_REQUEST,
            ApiError::MissingConfiguration => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::UnsupportedPayload(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Failing => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }

    /// Attach the request path the error is reported for.
    pub fn at(self, path: impl Into<String>) -> ErrorResponse {
        ErrorResponse {
            error: self,
            path: path.into(),
        }
    }
}

/// An [`ApiError`] bound to the request path it occurred on.
#[derive(Debug, Clone)]
pub struct ErrorResponse {
    pub error: ApiError,
    pub path: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    path: &'a str,
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = self.error.status();
        if status.is_server_error() {
            tracing::warn!(path = %self.path, status = %status, error = %self.error, "Request failed");
        } else {
            tracing::debug!(path = %self.path, status = %status, error = %self.error, "Request rejected");
        }

        let body = ErrorBody {
            error: self.error.to_string(),
            path: &self.path,
        };
        (status, Json(body)).into_response()
    }
}
