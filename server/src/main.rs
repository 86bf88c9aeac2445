//! Aula Bot Server - Main Entry Point
//!
//! Webhook interaction service for the Aula course community.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use aula_server::ai::OpenAiClient;
use aula_server::catalog::Catalog;
use aula_server::kv::RedisKv;
use aula_server::platform::DiscordRest;
use aula_server::{api, config, kv};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aula_server=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Aula Bot Server"
    );

    // Initialize collaborators
    let redis = kv::create_redis_client(&config.redis_url).await?;
    let platform = Arc::new(DiscordRest::new(config.bot_token.clone())?);
    let ai = Arc::new(OpenAiClient::new(
        config.openai_api_key.clone(),
        config.openai_model.clone(),
    )?);

    // Sync the command table with the platform when asked to
    if config.register_commands {
        platform.register_commands(&config.application_id).await?;
    }

    // Build application state
    let state = api::AppState::new(
        config.clone(),
        Catalog::builtin(),
        Arc::new(RedisKv::new(redis)),
        platform,
        ai,
    );

    // Build router
    let app = api::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(address = %config.bind_address, "Server listening");

    // Graceful shutdown handler
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Received shutdown signal, cleaning up...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");

    Ok(())
}
