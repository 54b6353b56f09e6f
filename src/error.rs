use axum::{Json, http::StatusCode, response::IntoResponse};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

use crate::types::envelope::Envelope;

/// Error taxonomy for the gateway. Every variant maps to exactly one HTTP
/// status and is rendered with the uniform `{status, message}` envelope.
#[derive(Debug, ThisError)]
pub enum GatewayError {
    /// Unknown identifier and wrong password share one message on purpose:
    /// the response must not disclose which part failed.
    #[error("Invalid client ID/email or password")]
    InvalidCredentials,

    #[error("Authorization header required")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidOrExpiredToken,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("storage failure: {0}")]
    Storage(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] SqlxError),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            GatewayError::InvalidCredentials
            | GatewayError::MissingToken
            | GatewayError::InvalidOrExpiredToken => StatusCode::UNAUTHORIZED,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Storage(_) | GatewayError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Internal faults are logged in full and surfaced with a generic
        // message; everything else is safe to show verbatim.
        let message = match &self {
            GatewayError::Database(e) => {
                error!(error = %e, "database error");
                "An internal server error occurred.".to_string()
            }
            GatewayError::Storage(e) => {
                error!(error = %e, "storage failure");
                "A storage error occurred.".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(Envelope::error(message))).into_response()
    }
}
