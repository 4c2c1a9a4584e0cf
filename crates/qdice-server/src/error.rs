//! Error types for the measurement API.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use qdice_engine::{ErrorKind, MeasureError};

use crate::dto::FailureResponse;

/// API error type that converts to HTTP responses.
///
/// Every failure uses the same `{"success": false, "error": ...}` body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body or one of its fields is unusable.
    #[error("{0}")]
    InvalidInput(String),

    /// The measurement could not be produced.
    #[error("{0}")]
    Execution(String),
}

impl ApiError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::InvalidInput(_) => ErrorKind::InvalidInput,
            ApiError::Execution(_) => ErrorKind::Execution,
        }
    }

    /// Status code; input errors only get 400 when `split_error_status` is set.
    pub fn status(&self, split_error_status: bool) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) if split_error_status => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render the failure response.
    pub fn into_response_with(self, split_error_status: bool) -> Response {
        let status = self.status(split_error_status);
        let body = Json(FailureResponse::new(self.to_string()));
        (status, body).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_response_with(false)
    }
}

impl From<MeasureError> for ApiError {
    fn from(e: MeasureError) -> Self {
        match e.kind() {
            ErrorKind::InvalidInput => ApiError::InvalidInput(e.to_string()),
            ErrorKind::Execution => ApiError::Execution(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::InvalidInput(e.body_text())
    }
}
