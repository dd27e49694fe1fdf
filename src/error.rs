use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Malformed document {id} in {collection}: {reason}")]
    Malformed {
        collection: String,
        id: String,
        reason: String,
    },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Invalid request body: {0}")]
    Payload(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Payload(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Both kinds surface identically; only the log level differs.
        match &self {
            AppError::Validation(e) => warn!("rejected record: {}", e),
            AppError::Payload(e) => warn!("rejected body: {}", e),
            AppError::Storage(e) => error!("storage error: {}", e),
        }

        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let body = Json(ErrorResponse {
            error: status.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}
