use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use shelf_service::ServiceError;

/// Errors from starting and running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] shelf_store::StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Errors returned to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Request decoding
    // ==================
    /// A required path parameter is empty.
    #[error("missing parameter: {0}")]
    MissingParam(&'static str),

    /// A path identifier is not an integer.
    #[error("invalid id: {0:?}")]
    InvalidId(String),

    /// The request body could not be decoded.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    // ==================
    // Service rejections and storage failures
    // ==================
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingParam(_) | ApiError::InvalidId(_) | ApiError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Service(ServiceError::EntityNotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Service(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
