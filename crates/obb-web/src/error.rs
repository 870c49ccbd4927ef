use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use obb_core::FetchError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::params::FieldError;

/// Failures surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid query parameters")]
    InvalidQuery(Vec<FieldError>),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl ApiError {
    /// Only "no data" is distinguished from other fetch failures.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidQuery(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Fetch(error) if error.is_not_found() => StatusCode::NOT_FOUND,
            Self::Fetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        Self::InvalidQuery(errors)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidQuery(vec![FieldError::unreadable_query(rejection.body_text())])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::InvalidQuery(errors) => json!({ "detail": errors }),
            Self::Fetch(error) if error.is_not_found() => json!({ "detail": error.to_string() }),
            Self::Fetch(error) => {
                error!(code = error.code(), %error, "historical fetch failed");
                json!({ "detail": format!("Internal server error: {error}") })
            }
        };
        (status, Json(body)).into_response()
    }
}
