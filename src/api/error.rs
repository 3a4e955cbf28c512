//! Mapping of [`AppError`] onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::AppError;

/// JSON body attached to every error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Machine-readable error kind.
    pub error: String,
    /// Human-readable detail. Server-side failures carry a generic text.
    pub message: String,
}

impl AppError {
    /// HTTP status and error kind for this failure.
    #[must_use]
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            Self::InvalidPath(_) => (StatusCode::BAD_REQUEST, "invalid_path"),
            Self::Validation(err) if err.is_malformed() => {
                (StatusCode::BAD_REQUEST, "malformed_json")
            }
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation"),
            Self::Db(_) => (StatusCode::INTERNAL_SERVER_ERROR, "db"),
            Self::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config"),
            Self::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status();
        let message = if status.is_server_error() {
            error!(err = %self, "request failed");
            "internal server error".to_owned()
        } else {
            debug!(err = %self, "request rejected");
            match self {
                Self::NotFound(msg) | Self::InvalidPath(msg) => msg,
                Self::Validation(err) => err.to_string(),
                other => other.to_string(),
            }
        };

        let body = ErrorBody {
            error: kind.to_owned(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
