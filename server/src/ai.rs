//! Answer Generation Client
//!
//! Chat-completions client used by the answer pipeline's generation tier.
//! The pipeline imposes its own race timeout; the client timeout below only
//! bounds connection setup and pathological responses.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Hard client-side timeout; the pipeline's race fires long before this.
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Generates a free-text answer for a question.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Complete `prompt` under `system` instructions, bounded by `max_tokens`.
    async fn complete(&self, prompt: &str, system: &str, max_tokens: u32) -> Result<String>;
}

/// OpenAI chat-completions implementation.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: String,
}

impl OpenAiClient {
    /// Create a client with its own connection pool and timeout.
    pub fn new(api_key: String, model: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(CLIENT_TIMEOUT)
            .build()
            .context("failed to build completions HTTP client")?;
        Ok(Self {
            http,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl AnswerGenerator for OpenAiClient {
    async fn complete(&self, prompt: &str, system: &str, max_tokens: u32) -> Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": prompt },
            ],
            "max_tokens": max_tokens,
        });

        let resp = self
            .http
            .post(COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("completion request failed")?;

        let status = resp.status();
        if !status.is_success() {
            bail!("completion request returned HTTP {status}");
        }

        let completion: CompletionResponse = resp
            .json()
            .await
            .context("failed to decode completion response")?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();

        if text.trim().is_empty() {
            bail!("completion response contained no content");
        }
        Ok(text)
    }
}
