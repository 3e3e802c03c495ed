//! Integration tests for the `wordsprint-store` data layer.
//!
//! These tests require a live Redis instance at `redis://localhost:6379`
//! (e.g. `docker run --rm -p 6379:6379 redis`). Run with:
//!
//! ```bash
//! cargo test -p wordsprint-store -- --ignored
//! ```
//!
//! All tests are marked `#[ignore]` so they are skipped during normal
//! `cargo test` runs.

// Integration tests use expect/unwrap extensively for clarity -- panicking
// on failure is the correct behavior in test code.
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]

use std::time::Duration;

use wordsprint_store::{KvStore, RedisStore};

/// Redis connection URL for the local test instance.
const REDIS_URL: &str = "redis://localhost:6379";

async fn setup() -> RedisStore {
    let store = RedisStore::connect(REDIS_URL, Duration::from_secs(2))
        .await
        .expect("Failed to connect to Redis -- is Redis running?");
    store.flush_all().await.expect("Failed to flush");
    store
}

#[tokio::test]
#[ignore = "requires a live Redis instance at REDIS_URL"]
async fn set_nx_roundtrip() {
    let store = setup().await;

    assert!(store.set_nx("it:lock", "1", None).await.unwrap());
    assert!(!store.set_nx("it:lock", "2", None).await.unwrap());
    assert_eq!(store.get("it:lock").await.unwrap(), Some("1".to_owned()));
}

#[tokio::test]
#[ignore = "requires a live Redis instance at REDIS_URL"]
async fn set_nx_ttl_lapses() {
    let store = setup().await;

    assert!(
        store
            .set_nx("it:cd", "1", Some(Duration::from_secs(1)))
            .await
            .unwrap()
    );
    assert!(
        !store
            .set_nx("it:cd", "1", Some(Duration::from_secs(1)))
            .await
            .unwrap()
    );

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(
        store
            .set_nx("it:cd", "1", Some(Duration::from_secs(1)))
            .await
            .unwrap()
    );
}

#[tokio::test]
#[ignore = "requires a live Redis instance at REDIS_URL"]
async fn hash_incr_and_get() {
    let store = setup().await;

    assert_eq!(store.hash_incr("it:att", "1", 1).await.unwrap(), 1);
    assert_eq!(store.hash_incr("it:att", "1", 1).await.unwrap(), 2);
    assert_eq!(
        store.hash_get("it:att", "1").await.unwrap(),
        Some("2".to_owned())
    );
    assert_eq!(store.hash_get("it:att", "7").await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires a live Redis instance at REDIS_URL"]
async fn sets_and_lists() {
    let store = setup().await;

    store.set_add("it:solved", "1").await.unwrap();
    store.set_add("it:solved", "2").await.unwrap();
    store.set_add("it:solved", "2").await.unwrap();
    let mut members = store.set_members("it:solved").await.unwrap();
    members.sort();
    assert_eq!(members, vec!["1".to_owned(), "2".to_owned()]);

    store.list_push("it:log", "a").await.unwrap();
    store.list_push("it:log", "b").await.unwrap();
    let entries = store.list_range("it:log", 0, -1).await.unwrap();
    assert_eq!(entries, vec!["a".to_owned(), "b".to_owned()]);
}

#[tokio::test]
#[ignore = "requires a live Redis instance at REDIS_URL"]
async fn ttl_batch_semantics() {
    let store = setup().await;

    store.set("it:plain", "v").await.unwrap();
    store
        .set_nx("it:locked", "1", Some(Duration::from_secs(30)))
        .await
        .unwrap();

    let ttls = store
        .ttl_batch(&[
            "it:missing".to_owned(),
            "it:plain".to_owned(),
            "it:locked".to_owned(),
        ])
        .await
        .unwrap();
    assert_eq!(ttls[0], -2);
    assert_eq!(ttls[1], -1);
    assert!(ttls[2] > 0 && ttls[2] <= 30);
}
