//! In-memory [`KvStore`] fake for tests.
//!
//! Honors the semantics the game relies on: set-if-absent, per-key expiry
//! (checked lazily on access), atomic hash increments, sets, and lists.
//! Not intended for production use; there is no eviction beyond TTL lapse.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::kv::KvStore;

/// One stored value with its optional expiry deadline.
#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires_at: Option<Instant>,
}

/// The data types the fake can hold, mirroring the Redis types the game uses.
#[derive(Debug, Clone)]
enum Value {
    Text(String),
    Hash(HashMap<String, String>),
    Set(BTreeSet<String>),
    List(Vec<String>),
}

/// In-memory key-value store honoring NX and TTL semantics.
///
/// Cloning is cheap; all clones share the same underlying map, so a test
/// can hand clones to several components and observe shared state, just as
/// production handlers share one Redis connection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, Entry>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every key. Useful between test cases sharing a store.
    pub async fn clear(&self) {
        self.inner.lock().await.clear();
    }
}

/// Remove `key` if its entry has lapsed, then return whether it is live.
fn purge_expired(map: &mut HashMap<String, Entry>, key: &str, now: Instant) -> bool {
    let lapsed = map
        .get(key)
        .is_some_and(|e| e.expires_at.is_some_and(|at| at <= now));
    if lapsed {
        map.remove(key);
    }
    map.contains_key(key)
}

/// Remaining TTL in whole seconds, rounded up so a live sub-second lock
/// still reports a positive wait.
fn remaining_seconds(deadline: Instant, now: Instant) -> i64 {
    let left = deadline.saturating_duration_since(now);
    let secs = i64::try_from(left.as_secs()).unwrap_or(i64::MAX);
    if left.subsec_nanos() > 0 {
        secs.saturating_add(1)
    } else {
        secs
    }
}

impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let now = Instant::now();
        let mut map = self.inner.lock().await;
        if !purge_expired(&mut map, key, now) {
            return Ok(None);
        }
        match map.get(key).map(|e| &e.value) {
            Some(Value::Text(s)) => Ok(Some(s.clone())),
            Some(_) => Err(StoreError::WrongType(key.to_owned())),
            None => Ok(None),
        }
    }

    async fn set_nx(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<bool, StoreError> {
        let now = Instant::now();
        let mut map = self.inner.lock().await;
        if purge_expired(&mut map, key, now) {
            return Ok(false);
        }
        map.insert(
            key.to_owned(),
            Entry {
                value: Value::Text(value.to_owned()),
                expires_at: ttl.map(|t| now.checked_add(t).unwrap_or(now)),
            },
        );
        Ok(true)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.inner.lock().await;
        map.insert(
            key.to_owned(),
            Entry {
                value: Value::Text(value.to_owned()),
                expires_at: None,
            },
        );
        Ok(())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        let now = Instant::now();
        let mut map = self.inner.lock().await;
        if purge_expired(&mut map, key, now)
            && let Some(entry) = map.get_mut(key)
        {
            entry.expires_at = now.checked_add(ttl);
        }
        Ok(())
    }

    async fn hash_incr(&self, key: &str, field: &str, delta: i64) -> Result<i64, StoreError> {
        let now = Instant::now();
        let mut map = self.inner.lock().await;
        purge_expired(&mut map, key, now);
        let entry = map.entry(key.to_owned()).or_insert_with(|| Entry {
            value: Value::Hash(HashMap::new()),
            expires_at: None,
        });
        let Value::Hash(hash) = &mut entry.value else {
            return Err(StoreError::WrongType(key.to_owned()));
        };
        let current = hash
            .get(field)
            .map_or(Ok(0), |v| v.parse::<i64>())
            .map_err(|_| StoreError::WrongType(key.to_owned()))?;
        let updated = current
            .checked_add(delta)
            .ok_or_else(|| StoreError::Overflow(key.to_owned()))?;
        hash.insert(field.to_owned(), updated.to_string());
        Ok(updated)
    }

    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
        let now = Instant::now();
        let mut map = self.inner.lock().await;
        if !purge_expired(&mut map, key, now) {
            return Ok(None);
        }
        match map.get(key).map(|e| &e.value) {
            Some(Value::Hash(hash)) => Ok(hash.get(field).cloned()),
            Some(_) => Err(StoreError::WrongType(key.to_owned())),
            None => Ok(None),
        }
    }

    async fn set_add(&self, key: &str, member: &str) -> Result<(), StoreError> {
        let now = Instant::now();
        let mut map = self.inner.lock().await;
        purge_expired(&mut map, key, now);
        let entry = map.entry(key.to_owned()).or_insert_with(|| Entry {
            value: Value::Set(BTreeSet::new()),
            expires_at: None,
        });
        let Value::Set(set) = &mut entry.value else {
            return Err(StoreError::WrongType(key.to_owned()));
        };
        set.insert(member.to_owned());
        Ok(())
    }

    async fn set_members(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let now = Instant::now();
        let mut map = self.inner.lock().await;
        if !purge_expired(&mut map, key, now) {
            return Ok(Vec::new());
        }
        match map.get(key).map(|e| &e.value) {
            Some(Value::Set(set)) => Ok(set.iter().cloned().collect()),
            Some(_) => Err(StoreError::WrongType(key.to_owned())),
            None => Ok(Vec::new()),
        }
    }

    async fn list_push(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let now = Instant::now();
        let mut map = self.inner.lock().await;
        purge_expired(&mut map, key, now);
        let entry = map.entry(key.to_owned()).or_insert_with(|| Entry {
            value: Value::List(Vec::new()),
            expires_at: None,
        });
        let Value::List(list) = &mut entry.value else {
            return Err(StoreError::WrongType(key.to_owned()));
        };
        list.push(value.to_owned());
        Ok(())
    }

    async fn list_range(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError> {
        let now = Instant::now();
        let mut map = self.inner.lock().await;
        if !purge_expired(&mut map, key, now) {
            return Ok(Vec::new());
        }
        match map.get(key).map(|e| &e.value) {
            Some(Value::List(list)) => {
                let len = i64::try_from(list.len()).unwrap_or(i64::MAX);
                // Redis LRANGE semantics: negative indices count from the end,
                // out-of-range indices are clamped, inverted ranges are empty.
                let resolve = |idx: i64| -> i64 {
                    if idx < 0 { len.saturating_add(idx) } else { idx }
                };
                let from = resolve(start).max(0);
                let to = resolve(stop).min(len.saturating_sub(1));
                if from > to {
                    return Ok(Vec::new());
                }
                let from = usize::try_from(from).unwrap_or(0);
                let to = usize::try_from(to).unwrap_or(0);
                Ok(list
                    .iter()
                    .skip(from)
                    .take(to.saturating_sub(from).saturating_add(1))
                    .cloned()
                    .collect())
            }
            Some(_) => Err(StoreError::WrongType(key.to_owned())),
            None => Ok(Vec::new()),
        }
    }

    async fn ttl_batch(&self, keys: &[String]) -> Result<Vec<i64>, StoreError> {
        let now = Instant::now();
        let mut map = self.inner.lock().await;
        let mut out = Vec::with_capacity(keys.len());
        for key in keys {
            if !purge_expired(&mut map, key, now) {
                out.push(-2);
                continue;
            }
            out.push(
                map.get(key.as_str())
                    .and_then(|e| e.expires_at)
                    .map_or(-1, |deadline| remaining_seconds(deadline, now)),
            );
        }
        Ok(out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_nx_is_first_writer_wins() {
        let store = MemoryStore::new();
        assert!(store.set_nx("k", "a", None).await.unwrap());
        assert!(!store.set_nx("k", "b", None).await.unwrap());
        assert_eq!(store.get("k").await.unwrap(), Some("a".to_owned()));
    }

    #[tokio::test]
    async fn expired_key_can_be_reacquired() {
        let store = MemoryStore::new();
        let ttl = Duration::from_millis(30);
        assert!(store.set_nx("lock", "1", Some(ttl)).await.unwrap());
        assert!(!store.set_nx("lock", "1", Some(ttl)).await.unwrap());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(store.set_nx("lock", "1", Some(ttl)).await.unwrap());
    }

    #[tokio::test]
    async fn hash_incr_counts_from_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.hash_incr("h", "3", 1).await.unwrap(), 1);
        assert_eq!(store.hash_incr("h", "3", 1).await.unwrap(), 2);
        assert_eq!(store.hash_get("h", "3").await.unwrap(), Some("2".to_owned()));
        assert_eq!(store.hash_get("h", "9").await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_range_matches_redis_semantics() {
        let store = MemoryStore::new();
        for v in ["a", "b", "c"] {
            store.list_push("l", v).await.unwrap();
        }
        let all = store.list_range("l", 0, -1).await.unwrap();
        assert_eq!(all, vec!["a", "b", "c"]);
        let tail = store.list_range("l", 1, 5).await.unwrap();
        assert_eq!(tail, vec!["b", "c"]);
        let empty = store.list_range("l", 2, 1).await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn ttl_batch_distinguishes_missing_and_persistent() {
        let store = MemoryStore::new();
        store.set("plain", "v").await.unwrap();
        store
            .set_nx("locked", "1", Some(Duration::from_secs(3)))
            .await
            .unwrap();

        let ttls = store
            .ttl_batch(&[
                "missing".to_owned(),
                "plain".to_owned(),
                "locked".to_owned(),
            ])
            .await
            .unwrap();
        assert_eq!(ttls.len(), 3);
        assert_eq!(ttls.first().copied(), Some(-2));
        assert_eq!(ttls.get(1).copied(), Some(-1));
        assert!(ttls.get(2).copied().unwrap_or(0) > 0);
    }

    #[tokio::test]
    async fn wrong_type_is_an_error() {
        let store = MemoryStore::new();
        store.set("text", "v").await.unwrap();
        assert!(matches!(
            store.set_add("text", "m").await,
            Err(StoreError::WrongType(_))
        ));
    }

    #[tokio::test]
    async fn clones_share_state() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set_add("s", "1").await.unwrap();
        assert_eq!(b.set_members("s").await.unwrap(), vec!["1".to_owned()]);
    }
}
