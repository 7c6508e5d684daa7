use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Record not found")]
    NotFound,
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage unavailable: {0}")]
    Unavailable(sqlx::Error),
    #[error("Internal server error: {0}")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }
}

impl From<anyhow::Error> for ApiError {
    /// Storage faults are surfaced as unavailability, distinct from a
    /// missing record; anything else is an internal error.
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<sqlx::Error>() {
            Ok(db_err) => ApiError::Unavailable(db_err),
            Err(other) => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Record not found"),
            ApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "Validation failed"),
            ApiError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "Storage unavailable"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        let body = Json(json!({
            "error": error_message,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
