//! The [`KvStore`] trait: the store primitives the game core depends on.
//!
//! The trait captures the consistency model the game is designed against:
//! each method is a single atomic operation on one key. There are no
//! cross-key transactions; callers that perform multi-key sequences must
//! tolerate partial completion (see the coordinator's documentation).
//!
//! Methods return `impl Future + Send` rather than plain `async fn` so the
//! trait can be used from spawned request handlers, which require `Send`
//! futures.

use std::future::Future;
use std::time::Duration;

use crate::error::StoreError;

/// Abstract interface to the shared key-value store.
///
/// Implemented by [`RedisStore`](crate::redis::RedisStore) in production and
/// [`MemoryStore`](crate::memory::MemoryStore) in tests.
pub trait KvStore: Clone + Send + Sync + 'static {
    /// Read the string value at `key`, if any.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Set `key` to `value` only if the key does not exist, optionally with
    /// an expiry. Returns `true` if the key was newly set.
    ///
    /// This is the system's only mutual-exclusion device: cooldown locks and
    /// the bot start epoch both rely on its atomicity.
    fn set_nx(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Set `key` to `value` unconditionally (used for the monotonic bot
    /// progress fraction, where last-writer-wins is acceptable because every
    /// writer only ever raises the value).
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Refresh the time-to-live of `key`. A missing key is not an error.
    fn expire(
        &self,
        key: &str,
        ttl: Duration,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Atomically add `delta` to the integer at `field` inside the hash at
    /// `key`, creating both as needed. Returns the new value.
    fn hash_incr(
        &self,
        key: &str,
        field: &str,
        delta: i64,
    ) -> impl Future<Output = Result<i64, StoreError>> + Send;

    /// Read the value of `field` inside the hash at `key`, if any.
    fn hash_get(
        &self,
        key: &str,
        field: &str,
    ) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Add `member` to the set at `key`, creating it as needed.
    fn set_add(
        &self,
        key: &str,
        member: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Read all members of the set at `key` (empty if missing).
    fn set_members(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;

    /// Append `value` to the end of the list at `key`, creating it as needed.
    fn list_push(
        &self,
        key: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Read the inclusive range `[start, stop]` of the list at `key`.
    /// Negative indices count from the end, Redis-style (`0, -1` = whole
    /// list). Empty if the key is missing.
    fn list_range(
        &self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;

    /// Batched TTL lookup. Returns one entry per input key, in order:
    /// remaining seconds if the key exists with an expiry, `-1` if it exists
    /// without one, `-2` if it does not exist (Redis `TTL` semantics).
    fn ttl_batch(
        &self,
        keys: &[String],
    ) -> impl Future<Output = Result<Vec<i64>, StoreError>> + Send;
}
