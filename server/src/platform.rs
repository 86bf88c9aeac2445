//! Platform REST Client
//!
//! Bot-token authenticated calls to the chat platform: role assignment,
//! thread creation, interaction follow-up messages, and slash-command
//! registration.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

use crate::commands;

const API_BASE: &str = "https://discord.com/api/v10";

/// Outbound request timeout. Synchronous callers (thread creation) surface
/// failures to the user; background callers only log.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Reference to a created thread.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadRef {
    pub id: String,
}

/// Outbound platform operations used by the command handlers.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Grant `role_id` to `user_id` in `guild_id`.
    async fn assign_role(&self, guild_id: &str, user_id: &str, role_id: &str) -> Result<()>;

    /// Create a public thread in `channel_id` and post `message` into it.
    async fn create_thread(&self, channel_id: &str, name: &str, message: &str)
        -> Result<ThreadRef>;

    /// Send a follow-up message for a previously-acknowledged interaction.
    async fn create_followup_message(
        &self,
        application_id: &str,
        token: &str,
        content: &str,
    ) -> Result<()>;
}

/// REST implementation against the platform API.
pub struct DiscordRest {
    http: reqwest::Client,
    bot_token: String,
}

impl DiscordRest {
    pub fn new(bot_token: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build platform HTTP client")?;
        Ok(Self { http, bot_token })
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.bot_token)
    }

    /// Replace the application's global slash commands with the static
    /// command table. Run at startup when `REGISTER_COMMANDS` is set.
    pub async fn register_commands(&self, application_id: &str) -> Result<()> {
        let payload: Vec<serde_json::Value> = commands::SPECS
            .iter()
            .map(|spec| {
                serde_json::json!({
                    "name": spec.name,
                    "description": spec.description,
                    "options": spec
                        .options
                        .iter()
                        .map(|opt| {
                            serde_json::json!({
                                "name": opt.name,
                                "description": opt.description,
                                "type": opt.kind.wire_type(),
                                "required": opt.required,
                            })
                        })
                        .collect::<Vec<_>>(),
                })
            })
            .collect();

        let resp = self
            .http
            .put(format!("{API_BASE}/applications/{application_id}/commands"))
            .header("Authorization", self.auth_header())
            .json(&payload)
            .send()
            .await
            .context("command registration request failed")?;

        let status = resp.status();
        if !status.is_success() {
            bail!("command registration returned HTTP {status}");
        }

        info!(count = payload.len(), "Slash commands registered");
        Ok(())
    }
}

#[async_trait]
impl PlatformClient for DiscordRest {
    async fn assign_role(&self, guild_id: &str, user_id: &str, role_id: &str) -> Result<()> {
        let resp = self
            .http
            .put(format!(
                "{API_BASE}/guilds/{guild_id}/members/{user_id}/roles/{role_id}"
            ))
            .header("Authorization", self.auth_header())
            .send()
            .await
            .context("role assignment request failed")?;

        let status = resp.status();
        if !status.is_success() {
            bail!("role assignment returned HTTP {status}");
        }
        Ok(())
    }

    async fn create_thread(
        &self,
        channel_id: &str,
        name: &str,
        message: &str,
    ) -> Result<ThreadRef> {
        let resp = self
            .http
            .post(format!("{API_BASE}/channels/{channel_id}/threads"))
            .header("Authorization", self.auth_header())
            .json(&serde_json::json!({
                // 11 = public thread
                "name": name,
                "type": 11,
                "auto_archive_duration": 1440,
            }))
            .send()
            .await
            .context("thread creation request failed")?;

        let status = resp.status();
        if !status.is_success() {
            bail!("thread creation returned HTTP {status}");
        }

        let thread: ThreadRef = resp
            .json()
            .await
            .context("failed to decode thread creation response")?;

        // The starter message is best-effort: the thread reference is already
        // part of the user-visible answer.
        let starter = self
            .http
            .post(format!("{API_BASE}/channels/{}/messages", thread.id))
            .header("Authorization", self.auth_header())
            .json(&serde_json::json!({ "content": message }))
            .send()
            .await;
        match starter {
            Ok(r) if r.status().is_success() => {}
            Ok(r) => warn!(thread_id = %thread.id, status = %r.status(), "Starter message rejected"),
            Err(e) => warn!(thread_id = %thread.id, error = %e, "Starter message failed"),
        }

        Ok(thread)
    }

    async fn create_followup_message(
        &self,
        application_id: &str,
        token: &str,
        content: &str,
    ) -> Result<()> {
        let resp = self
            .http
            .post(format!("{API_BASE}/webhooks/{application_id}/{token}"))
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await
            .context("follow-up request failed")?;

        let status = resp.status();
        if !status.is_success() {
            bail!("follow-up message returned HTTP {status}");
        }
        Ok(())
    }
}
