//! Interaction Endpoint Errors

use axum::http::StatusCode;
use thiserror::Error;

/// Errors surfaced by the interactions endpoint before dispatch.
#[derive(Error, Debug)]
pub enum InteractionError {
    /// Missing or invalid request signature.
    #[error("invalid request signature")]
    Unauthorized,
    /// The authenticated body is not a valid interaction payload.
    #[error("malformed interaction payload")]
    MalformedPayload(#[from] serde_json::Error),
}

impl From<InteractionError> for (StatusCode, String) {
    fn from(err: InteractionError) -> Self {
        match err {
            InteractionError::Unauthorized => (StatusCode::UNAUTHORIZED, err.to_string()),
            InteractionError::MalformedPayload(e) => {
                tracing::warn!("Malformed interaction payload: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    "malformed interaction payload".to_string(),
                )
            }
        }
    }
}
