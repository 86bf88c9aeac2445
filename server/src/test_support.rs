//! In-memory collaborator fakes for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use crate::ai::AnswerGenerator;
use crate::api::AppState;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::kv::KvStore;
use crate::platform::{PlatformClient, ThreadRef};

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

/// Platform fake that records calls and always succeeds.
#[derive(Default)]
pub struct RecordingPlatform {
    pub role_calls: Mutex<Vec<(String, String, String)>>,
    pub thread_calls: Mutex<Vec<(String, String, String)>>,
    pub followups: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl PlatformClient for RecordingPlatform {
    async fn assign_role(&self, guild_id: &str, user_id: &str, role_id: &str) -> Result<()> {
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
        self.thread_calls.lock().expect("platform lock").push((
            channel_id.to_owned(),
            name.to_owned(),
            message.to_owned(),
        ));
        Ok(ThreadRef { id: "thread-1".into() })
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

/// Generator fake that answers instantly.
pub struct InstantGenerator(pub &'static str);

#[async_trait]
impl AnswerGenerator for InstantGenerator {
    async fn complete(&self, _prompt: &str, _system: &str, _max_tokens: u32) -> Result<String> {
        Ok(self.0.to_owned())
    }
}

/// State wired to fresh in-memory fakes.
#[must_use]
pub fn test_state() -> AppState {
    AppState::new(
        Config::default_for_test(),
        Catalog::builtin(),
        Arc::new(MemoryKv::default()),
        Arc::new(RecordingPlatform::default()),
        Arc::new(InstantGenerator("respuesta de prueba")),
    )
}
