//! Reusable test helpers for HTTP integration tests.
//!
//! Provides signed-request construction for the interactions endpoint plus
//! in-memory fakes for the KV, platform, and answer-generation collaborators.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use ed25519_dalek::{Signer, SigningKey};
use http_body_util::BodyExt;
use tower::ServiceExt;

use aula_server::ai::AnswerGenerator;
use aula_server::api::{create_router, AppState};
use aula_server::catalog::Catalog;
use aula_server::config::Config;
use aula_server::kv::KvStore;
use aula_server::platform::{PlatformClient, ThreadRef};

/// Deterministic signing key; its verifying key goes into the test config.
#[must_use]
pub fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&[42u8; 32])
}

/// Timestamp header value used by [`signed_request`].
pub const TEST_TIMESTAMP: &str = "1788998400";

/// Build a correctly signed POST to `/interactions`.
#[must_use]
pub fn signed_request(key: &SigningKey, body: &serde_json::Value) -> Request<Body> {
    let body_bytes = serde_json::to_vec(body).expect("serializable body");
    let mut message = TEST_TIMESTAMP.as_bytes().to_vec();
    message.extend_from_slice(&body_bytes);
    let signature = hex::encode(key.sign(&message).to_bytes());

    Request::builder()
        .method("POST")
        .uri("/interactions")
        .header("content-type", "application/json")
        .header("x-signature-ed25519", signature)
        .header("x-signature-timestamp", TEST_TIMESTAMP)
        .body(Body::from(body_bytes))
        .expect("valid request")
}

/// Send a request through the router and decode the JSON response.
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.oneshot(request).await.expect("infallible router");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("readable body")
        .to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

/// A command interaction payload from `user-1` in `guild-1`.
#[must_use]
pub fn command_payload(name: &str, options: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "type": 2,
        "token": "tok-1",
        "guild_id": "guild-1",
        "member": { "user": { "id": "user-1", "username": "ana" } },
        "data": { "name": name, "options": options }
    })
}

/// In-memory [`KvStore`].
#[derive(Default)]
pub struct MemoryKv {
    strings: Mutex<HashMap<String, String>>,
    sets: Mutex<HashMap<String, HashSet<String>>>,
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.strings.lock().expect("kv lock").get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.strings
            .lock()
            .expect("kv lock")
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn sismember(&self, set: &str, member: &str) -> Result<bool> {
        Ok(self
            .sets
            .lock()
            .expect("kv lock")
            .get(set)
            .is_some_and(|s| s.contains(member)))
    }

    async fn sadd(&self, set: &str, member: &str) -> Result<()> {
        self.sets
            .lock()
            .expect("kv lock")
            .entry(set.to_owned())
            .or_default()
            .insert(member.to_owned());
        Ok(())
    }
}

/// A [`KvStore`] whose every operation fails.
pub struct FailingKv;

#[async_trait]
impl KvStore for FailingKv {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        anyhow::bail!("store unavailable")
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<()> {
        anyhow::bail!("store unavailable")
    }

    async fn sismember(&self, _set: &str, _member: &str) -> Result<bool> {
        anyhow::bail!("store unavailable")
    }

    async fn sadd(&self, _set: &str, _member: &str) -> Result<()> {
        anyhow::bail!("store unavailable")
    }
}

/// Platform fake that records calls; delays and failures are configurable.
#[derive(Default)]
pub struct RecordingPlatform {
    pub role_calls: Mutex<Vec<(String, String, String)>>,
    pub thread_calls: Mutex<Vec<(String, String, String)>>,
    pub followups: Mutex<Vec<(String, String, String)>>,
    /// Applied to every `assign_role` call.
    pub role_delay: Duration,
    /// Applied to every `create_thread` call.
    pub thread_delay: Duration,
    /// Make `create_thread` fail after any delay.
    pub fail_threads: bool,
}

#[async_trait]
impl PlatformClient for RecordingPlatform {
    async fn assign_role(&self, guild_id: &str, user_id: &str, role_id: &str) -> Result<()> {
        if !self.role_delay.is_zero() {
            tokio::time::sleep(self.role_delay).await;
        }
        self.role_calls.lock().expect("platform lock").push((
            guild_id.to_owned(),
            user_id.to_owned(),
            role_id.to_owned(),
        ));
        Ok(())
    }

    async fn create_thread(
        &self,
        channel_id: &str,
        name: &str,
        message: &str,
    ) -> Result<ThreadRef> {
        if !self.thread_delay.is_zero() {
            tokio::time::sleep(self.thread_delay).await;
        }
        if self.fail_threads {
            anyhow::bail!("thread creation rejected");
        }
        self.thread_calls.lock().expect("platform lock").push((
            channel_id.to_owned(),
            name.to_owned(),
            message.to_owned(),
        ));
        Ok(ThreadRef {
            id: "thread-1".into(),
        })
    }

    async fn create_followup_message(
        &self,
        application_id: &str,
        token: &str,
        content: &str,
    ) -> Result<()> {
        self.followups.lock().expect("platform lock").push((
            application_id.to_owned(),
            token.to_owned(),
            content.to_owned(),
        ));
        Ok(())
    }
}

/// Generator fake that replies with `text` after `delay`.
pub struct DelayedGenerator {
    pub delay: Duration,
    pub text: &'static str,
    pub calls: Mutex<u32>,
}

impl DelayedGenerator {
    #[must_use]
    pub fn new(delay: Duration, text: &'static str) -> Self {
        Self {
            delay,
            text,
            calls: Mutex::new(0),
        }
    }
}

#[async_trait]
impl AnswerGenerator for DelayedGenerator {
    async fn complete(&self, _prompt: &str, _system: &str, _max_tokens: u32) -> Result<String> {
        *self.calls.lock().expect("generator lock") += 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.text.to_owned())
    }
}

/// Everything a test needs to drive the app and observe the collaborators.
pub struct TestApp {
    pub router: Router,
    pub key: SigningKey,
    pub kv: Arc<MemoryKv>,
    pub platform: Arc<RecordingPlatform>,
    pub generator: Arc<DelayedGenerator>,
}

/// Build a [`TestApp`], letting the caller shape the platform and generator.
#[must_use]
pub fn test_app(platform: RecordingPlatform, generator: DelayedGenerator) -> TestApp {
    let key = signing_key();
    let kv = Arc::new(MemoryKv::default());
    let platform = Arc::new(platform);
    let generator = Arc::new(generator);

    let mut config = Config::default_for_test();
    config.public_key = hex::encode(key.verifying_key().to_bytes());

    let state = AppState::new(
        config,
        Catalog::builtin(),
        kv.clone(),
        platform.clone(),
        generator.clone(),
    );

    TestApp {
        router: create_router(state),
        key,
        kv,
        platform,
        generator,
    }
}

/// Build a default [`TestApp`] (instant collaborators, nothing fails).
#[must_use]
pub fn default_app() -> TestApp {
    test_app(
        RecordingPlatform::default(),
        DelayedGenerator::new(Duration::ZERO, "respuesta generada"),
    )
}

/// Poll until `predicate` holds or the (possibly virtual) timeout elapses.
///
/// Sleeps instead of yielding so paused-clock tests still auto-advance.
pub async fn wait_until(predicate: impl Fn() -> bool) {
    tokio::time::timeout(Duration::from_secs(30), async {
        while !predicate() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition should hold before the timeout");
}
