//! Production [`KvStore`] implementation backed by Redis via `fred`.
//!
//! A single [`RedisStore`] is created at startup and cloned into every
//! request handler; `fred`'s client is internally shareable. Every command
//! is bounded by the timeout configured at connect time, so a slow or
//! unreachable store surfaces as an error instead of stalling the caller.

use std::time::Duration;

use fred::prelude::*;
use fred::types::{Expiration, SetOptions};

use crate::error::StoreError;
use crate::kv::KvStore;

/// Connection handle to a Redis instance.
///
/// Wraps a [`fred::prelude::Client`] and implements the [`KvStore`]
/// primitives the game core depends on.
#[derive(Clone)]
pub struct RedisStore {
    client: Client,
}

impl RedisStore {
    /// Connect to Redis at the given URL with the given per-command timeout.
    ///
    /// The URL follows the Redis URL scheme: `redis://host:port` or
    /// `redis://host:port/db`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Redis`] if the URL cannot be parsed or the
    /// connection fails.
    pub async fn connect(url: &str, command_timeout: Duration) -> Result<Self, StoreError> {
        let config = Config::from_url(url)?;

        let client = Builder::from_config(config)
            .with_performance_config(|perf| {
                perf.default_command_timeout = command_timeout;
            })
            .build()?;
        client.init().await?;

        tracing::info!(%url, ?command_timeout, "connected to Redis");
        Ok(Self { client })
    }

    /// Return a reference to the underlying [`Client`].
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// Flush all keys from the Redis instance.
    ///
    /// **WARNING:** This deletes all data. Only use for testing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Redis`] if the flush fails.
    pub async fn flush_all(&self) -> Result<(), StoreError> {
        let _: () = self.client.flushall(false).await?;
        Ok(())
    }
}

/// Clamp a [`Duration`] to whole seconds for Redis expiry arguments,
/// rounding sub-second values up so a short lock never becomes a no-op.
fn ttl_seconds(ttl: Duration) -> i64 {
    let secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
    if ttl.subsec_nanos() > 0 {
        secs.saturating_add(1)
    } else {
        secs.max(1)
    }
}

impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value: Option<String> = self.client.get(key).await?;
        Ok(value)
    }

    async fn set_nx(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<bool, StoreError> {
        let expiration = ttl.map(|t| Expiration::EX(ttl_seconds(t)));
        // With NX, SET replies OK when the key was set and nil otherwise.
        let reply: Option<String> = self
            .client
            .set(key, value, expiration, Some(SetOptions::NX), false)
            .await?;
        Ok(reply.is_some())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _: () = self.client.set(key, value, None, None, false).await?;
        Ok(())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        let _: bool = self.client.expire(key, ttl_seconds(ttl), None).await?;
        Ok(())
    }

    async fn hash_incr(&self, key: &str, field: &str, delta: i64) -> Result<i64, StoreError> {
        let value: i64 = self.client.hincrby(key, field, delta).await?;
        Ok(value)
    }

    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
        let value: Option<String> = self.client.hget(key, field).await?;
        Ok(value)
    }

    async fn set_add(&self, key: &str, member: &str) -> Result<(), StoreError> {
        let _: u64 = self.client.sadd(key, member).await?;
        Ok(())
    }

    async fn set_members(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let members: Vec<String> = self.client.smembers(key).await?;
        Ok(members)
    }

    async fn list_push(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _: u64 = self.client.rpush(key, value).await?;
        Ok(())
    }

    async fn list_range(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError> {
        let values: Vec<String> = self.client.lrange(key, start, stop).await?;
        Ok(values)
    }

    async fn ttl_batch(&self, keys: &[String]) -> Result<Vec<i64>, StoreError> {
        let pipeline = self.client.pipeline();
        for key in keys {
            let _: () = pipeline.ttl(key.as_str()).await?;
        }
        let ttls: Vec<i64> = pipeline.all().await?;
        Ok(ttls)
    }
}
