//! Interactions Endpoint
//!
//! Receives the platform's webhook POSTs. The body is taken as raw bytes and
//! verified against the application's public key BEFORE any JSON parsing:
//! the signature covers the exact octets as transmitted, so any re-encoding
//! or truncation here would silently break authentication.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use tracing::instrument;

use super::error::InteractionError;
use super::types::{Interaction, InteractionResponse};
use super::{dispatch, signing};
use crate::api::AppState;

/// Header carrying the hex-encoded detached signature.
const SIGNATURE_HEADER: &str = "x-signature-ed25519";

/// Header carrying the timestamp the signature covers.
const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// `POST /interactions`: authenticate, parse, dispatch.
///
/// A request that fails verification receives 401 with zero further
/// processing and zero side effects.
#[instrument(skip_all)]
pub async fn post_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<InteractionResponse>, (StatusCode, String)> {
    let signature = header_str(&headers, SIGNATURE_HEADER);
    let timestamp = header_str(&headers, TIMESTAMP_HEADER);

    let (Some(signature), Some(timestamp)) = (signature, timestamp) else {
        return Err(InteractionError::Unauthorized.into());
    };

    if !signing::verify_signature(&state.config.public_key, timestamp, &body, signature) {
        return Err(InteractionError::Unauthorized.into());
    }

    let interaction: Interaction =
        serde_json::from_slice(&body).map_err(InteractionError::MalformedPayload)?;

    Ok(Json(dispatch::dispatch(&state, interaction).await))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
