//! Error type for the JSON API.

use std::error::Error;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::collection::{Collection, UnknownCollection};
use crate::repository::RepositoryError;

#[derive(Debug)]
pub enum ApiError {
    /// Path names no known collection.
    UnknownCollection(String),
    /// Record id path segment is not a number.
    InvalidId(String),
    /// Body is not a JSON object.
    InvalidPayload,
    /// No record with that id.
    NotFound { collection: Collection, id: String },
    /// Collection layer failure.
    Repository(RepositoryError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::UnknownCollection(name) => write!(f, "Unknown collection: {}", name),
            ApiError::InvalidId(_) => f.write_str("Record id must be a number."),
            ApiError::InvalidPayload => f.write_str("Invalid JSON payload. Expected an object."),
            ApiError::NotFound { collection, id } => {
                write!(f, "No record found in {} with id {}", collection, id)
            }
            ApiError::Repository(e) => write!(f, "{}", e),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::Repository(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { collection, id } => ApiError::NotFound {
                collection,
                id: id.to_string(),
            },
            other => ApiError::Repository(other),
        }
    }
}

impl From<UnknownCollection> for ApiError {
    fn from(err: UnknownCollection) -> Self {
        ApiError::UnknownCollection(err.0)
    }
}

impl ApiError {
    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UnknownCollection(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidPayload => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Repository(RepositoryError::CapacityExceeded { .. }) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Repository(RepositoryError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
        }

        let body = match &self {
            ApiError::UnknownCollection(_) => json!({
                "error": self.to_string(),
                "supported": Collection::supported(),
            }),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
