//! Server Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080")
    pub bind_address: String,

    /// Redis connection URL
    pub redis_url: String,

    /// Hex-encoded Ed25519 public key from the platform's developer portal.
    /// Inbound interaction requests are verified against this key.
    pub public_key: String,

    /// Application ID of the bot (used for command registration and follow-ups)
    pub application_id: String,

    /// Bot token for outbound platform REST calls
    pub bot_token: String,

    /// Guild the community lives in
    pub guild_id: String,

    /// Role granted to verified students
    pub verified_role_id: String,

    /// Channel where `/miproyecto` threads are created
    pub projects_channel_id: String,

    /// API key for the answer-generation collaborator
    pub openai_api_key: String,

    /// Completion model (default: "gpt-4o-mini")
    pub openai_model: String,

    /// Sync the slash-command table to the platform on startup
    pub register_commands: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".into()),
            public_key: env::var("DISCORD_PUBLIC_KEY")
                .context("DISCORD_PUBLIC_KEY must be set")?,
            application_id: env::var("DISCORD_APPLICATION_ID")
                .context("DISCORD_APPLICATION_ID must be set")?,
            bot_token: env::var("DISCORD_BOT_TOKEN").context("DISCORD_BOT_TOKEN must be set")?,
            guild_id: env::var("GUILD_ID").context("GUILD_ID must be set")?,
            verified_role_id: env::var("VERIFIED_ROLE_ID")
                .context("VERIFIED_ROLE_ID must be set")?,
            projects_channel_id: env::var("PROJECTS_CHANNEL_ID")
                .context("PROJECTS_CHANNEL_ID must be set")?,
            openai_api_key: env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?,
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into()),
            register_commands: env::var("REGISTER_COMMANDS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }

    /// Create a default configuration for testing.
    ///
    /// Tests that exercise signature verification overwrite `public_key`
    /// with the hex of their own verifying key.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".into(),
            redis_url: "redis://localhost:6380".into(),
            public_key: String::new(),
            application_id: "app-1".into(),
            bot_token: "test-token".into(),
            guild_id: "guild-1".into(),
            verified_role_id: "role-1".into(),
            projects_channel_id: "channel-1".into(),
            openai_api_key: "test-key".into(),
            openai_model: "gpt-4o-mini".into(),
            register_commands: false,
        }
    }
}
