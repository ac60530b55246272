use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use certify_core::{Error as CoreError, StoreError};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("config error: {0}")]
    #[allow(clippy::enum_variant_names)]
    ConfigError(#[from] toolcraft_config::error::Error),

    #[error("db error: {0}")]
    DbError(#[from] surrealdb::Error),

    #[error(transparent)]
    Certify(#[from] CoreError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Certify(CoreError::Validation(e)) => {
                (StatusCode::BAD_REQUEST, format!("missing or invalid fields: {e}"))
            }
            AppError::Certify(CoreError::Store(_) | CoreError::IdentifierExhausted { .. }) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Failed to save the certificate. Please try again.".to_string(),
            ),
            AppError::Certify(CoreError::Export(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate PDF. Please try again.".to_string(),
            ),
            AppError::NotFound(e) => (StatusCode::NOT_FOUND, e.clone()),
            AppError::ServiceUnavailable(e) => (StatusCode::SERVICE_UNAVAILABLE, e.clone()),
            // Path ids are looked up as-is; a malformed id here comes from stored data
            AppError::Certify(CoreError::InvalidId(_))
            | AppError::ConfigError(_)
            | AppError::DbError(_)
            | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            ),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Certify(e.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T, E = AppError> = core::result::Result<T, E>;
