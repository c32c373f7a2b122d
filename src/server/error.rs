//! Mapping of query failures to HTTP responses.

use crate::error::Error;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{error, warn};

/// Failure of an API request, rendered as `{"error": message}`.
#[derive(Debug)]
pub enum ApiError {
    /// Requested resource does not exist.
    NotFound(String),
    /// Query parameters could not be interpreted.
    BadRequest(String),
    /// Detection data is not available.
    Unavailable(String),
    /// Anything else.
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        match e {
            Error::DetectionDirNotFound { .. } => {
                warn!("{e}");
                Self::Unavailable(e.to_string())
            }
            other => {
                let message = other.chain_message();
                error!("Request failed: {message}");
                Self::Internal(message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::NotFound(m) | Self::BadRequest(m) | Self::Unavailable(m) | Self::Internal(m) => m,
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
