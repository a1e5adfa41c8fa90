// rest_api/src/errors.rs

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use lib::StorageError;
use models::errors::ValidationError;
use security::AuthError;

#[derive(Debug, Error)]
pub enum RestApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Json(#[from] JsonRejection),
    #[error(transparent)]
    Path(#[from] PathRejection),
    #[error(transparent)]
    Query(#[from] QueryRejection),
}

pub type ApiResult<T> = Result<T, RestApiError>;

impl RestApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        RestApiError::NotFound(message.into())
    }

    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            RestApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            RestApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            RestApiError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            RestApiError::Storage(StorageError::NotFound(what)) => {
                (StatusCode::NOT_FOUND, format!("{what} not found"))
            }
            RestApiError::Storage(StorageError::AlreadyExists(msg)) => (StatusCode::BAD_REQUEST, msg),
            RestApiError::Storage(StorageError::Validation(e))
            | RestApiError::Auth(AuthError::Validation(e)) => (StatusCode::BAD_REQUEST, e.to_string()),
            RestApiError::Storage(e) | RestApiError::Auth(AuthError::Storage(e)) => {
                error!("Storage failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            RestApiError::Auth(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            RestApiError::Json(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            RestApiError::Path(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            RestApiError::Query(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
        }
    }
}

// Every failure shares one body: { "success": false, "error": "<message>" }
impl IntoResponse for RestApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}
