use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use std::path::PathBuf;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum HubError {
    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read schema script {}: {source}", path.display())]
    SchemaRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),
}

impl HubError {
    pub fn not_found(what: impl Into<String>) -> Self {
        HubError::NotFound(what.into())
    }

    pub fn conflict(what: impl Into<String>) -> Self {
        HubError::Conflict(what.into())
    }

    pub fn bad_request(what: impl Into<String>) -> Self {
        HubError::BadRequest(what.into())
    }

    /// HTTP status and machine-readable code for this error.
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            HubError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            HubError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            HubError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            HubError::Database(SqlxError::RowNotFound) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            HubError::Database(SqlxError::PoolTimedOut) => {
                (StatusCode::SERVICE_UNAVAILABLE, "DATABASE_BUSY")
            }
            HubError::Database(SqlxError::Database(db))
                if db.is_unique_violation() || db.is_foreign_key_violation() =>
            {
                (StatusCode::CONFLICT, "CONFLICT")
            }
            HubError::Database(_)
            | HubError::Io(_)
            | HubError::SchemaRead { .. }
            | HubError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for HubError {
    fn into_response(self) -> axum::response::Response {
        let (status, code) = self.status();
        let message = match &self {
            HubError::NotFound(_) | HubError::Conflict(_) | HubError::BadRequest(_) => {
                self.to_string()
            }
            HubError::Database(SqlxError::RowNotFound) => "Resource not found.".to_string(),
            HubError::Database(SqlxError::PoolTimedOut) => {
                "Database is busy, try again later.".to_string()
            }
            _ if status == StatusCode::CONFLICT => {
                "Request conflicts with existing data.".to_string()
            }
            _ => {
                error!(error = %self, "request failed with internal error");
                "An internal server error occurred.".to_string()
            }
        };

        let body = ApiErrorResponse {
            status: "failure",
            error: ApiErrorBody {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub status: &'static str,
    pub error: ApiErrorBody,
}
