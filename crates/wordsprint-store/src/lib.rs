//! Key-value state store for the Wordsprint game server.
//!
//! All cross-request game state lives behind the [`KvStore`] trait: player
//! solved sets, attempt counters, attempt logs, cooldown locks, and the
//! global bot progress record. The store's own single-key atomicity is the
//! only synchronization primitive in the system; there are no in-process
//! locks and no cross-key transactions.
//!
//! # Modules
//!
//! - [`kv`] -- The [`KvStore`] trait (the store primitives the game needs)
//! - [`redis`] -- Production implementation backed by Redis via `fred`
//! - [`memory`] -- In-memory fake honoring NX and TTL semantics, for tests
//! - [`keys`] -- The namespaced key schema
//! - [`error`] -- Shared error type

pub mod error;
pub mod keys;
pub mod kv;
pub mod memory;
pub mod redis;

// Re-export primary types for convenience.
pub use error::StoreError;
pub use kv::KvStore;
pub use memory::MemoryStore;
pub use redis::RedisStore;
