//! Key-Value Store
//!
//! Redis-backed store behind a narrow trait: atomic, key-granular
//! get/set/membership operations. Background writers rely on these being
//! idempotent upserts (last-write-wins).

use anyhow::Result;
use async_trait::async_trait;
use fred::prelude::*;
use tracing::info;

/// Atomic key-granular operations on the external store.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn sismember(&self, set: &str, member: &str) -> Result<bool>;
    async fn sadd(&self, set: &str, member: &str) -> Result<()>;
}

/// Redis implementation.
pub struct RedisKv {
    client: Client,
}

impl RedisKv {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl KvStore for RedisKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = self.client.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _: () = self.client.set(key, value, None, None, false).await?;
        Ok(())
    }

    async fn sismember(&self, set: &str, member: &str) -> Result<bool> {
        let is_member: bool = self.client.sismember(set, member).await?;
        Ok(is_member)
    }

    async fn sadd(&self, set: &str, member: &str) -> Result<()> {
        let _: i64 = self.client.sadd(set, member).await?;
        Ok(())
    }
}

/// Create and connect the Redis client.
pub async fn create_redis_client(redis_url: &str) -> Result<Client> {
    let config = Config::from_url(redis_url)?;
    let client = Client::new(config, None, None, None);
    client.connect();
    client.wait_for_connect().await?;

    info!("Connected to Redis");
    Ok(client)
}
