//! API Router and Application State
//!
//! Central routing configuration and shared state.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::ai::AnswerGenerator;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::interactions;
use crate::kv::KvStore;
use crate::platform::PlatformClient;

/// Shared application state.
///
/// Everything here is read-only per request: the config and catalog are
/// immutable after startup, and the collaborators are accessed through their
/// own internal synchronization.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// Static knowledge tables (keyword answers, resources, schedule)
    pub catalog: Arc<Catalog>,
    /// Key-value store collaborator
    pub kv: Arc<dyn KvStore>,
    /// Outbound platform REST collaborator
    pub platform: Arc<dyn PlatformClient>,
    /// Answer-generation collaborator
    pub ai: Arc<dyn AnswerGenerator>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        config: Config,
        catalog: Catalog,
        kv: Arc<dyn KvStore>,
        platform: Arc<dyn PlatformClient>,
        ai: Arc<dyn AnswerGenerator>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            kv,
            platform,
            ai,
        }
    }
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/interactions", post(interactions::post_interaction))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    /// Service status
    status: &'static str,
    /// Number of registered commands
    commands: usize,
}

/// Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        commands: crate::commands::SPECS.len(),
    })
}
