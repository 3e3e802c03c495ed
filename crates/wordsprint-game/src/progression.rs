//! Per-player solved sets and attempt accounting.
//!
//! Each operation here is a single atomic primitive against the store; the
//! sequences the coordinator composes from them are deliberately *not*
//! transactions (see the coordinator's documentation for the accepted
//! races). Store failures always surface as
//! [`GameError::Store`](crate::error::GameError::Store), never as "no
//! progress".

use std::collections::BTreeSet;
use std::time::Duration;

use wordsprint_store::{KvStore, keys};
use wordsprint_types::AttemptRecord;

use crate::error::GameError;

/// Per-player progression state machine backed by the shared store.
///
/// Cheap to clone; clones share the underlying store handle.
#[derive(Debug, Clone)]
pub struct Progression<S> {
    store: S,
    state_ttl: Duration,
}

impl<S: KvStore> Progression<S> {
    /// Create a progression view with the given retention window.
    pub const fn new(store: S, state_ttl: Duration) -> Self {
        Self { store, state_ttl }
    }

    /// The set of level ordinals the player has solved.
    ///
    /// Members that do not parse as ordinals are skipped rather than
    /// failing the read; the set is advisory about what remains playable.
    pub async fn solved_levels(&self, player: &str) -> Result<BTreeSet<u32>, GameError> {
        let members = self.store.set_members(&keys::player_solved(player)).await?;
        Ok(members
            .iter()
            .filter_map(|m| m.parse::<u32>().ok())
            .collect())
    }

    /// The lowest ordinal in `1..=total` not in `solved`; `total` if every
    /// level is solved (callers check full completion separately).
    pub fn next_unlocked_level(solved: &BTreeSet<u32>, total: u32) -> u32 {
        (1..=total).find(|level| !solved.contains(level)).unwrap_or(total.max(1))
    }

    /// Attempts consumed for one level; 0 if never recorded (or unreadable).
    pub async fn attempts_used(&self, player: &str, level: u32) -> Result<u32, GameError> {
        let raw = self
            .store
            .hash_get(&keys::player_attempts(player), &level.to_string())
            .await?;
        Ok(raw.and_then(|v| v.parse::<u32>().ok()).unwrap_or(0))
    }

    /// Atomically consume one attempt for the level, returning the new
    /// total. This is a bare increment: the ceiling check happens before it
    /// in the coordinator, which is a documented (non-atomic) pair.
    pub async fn consume_attempt(&self, player: &str, level: u32) -> Result<i64, GameError> {
        let used = self
            .store
            .hash_incr(&keys::player_attempts(player), &level.to_string(), 1)
            .await?;
        Ok(used)
    }

    /// Record a scored attempt: append it to the level's log and, if it was
    /// correct, add the level to the solved set.
    ///
    /// The solved-set update and the log append are independent atomic
    /// operations, not a transaction; a store failure between them can leave
    /// one without the other. Solved status is the authoritative one for
    /// progression, so it is written first.
    pub async fn record_attempt(
        &self,
        player: &str,
        level: u32,
        record: &AttemptRecord,
    ) -> Result<(), GameError> {
        if record.is_correct {
            self.store
                .set_add(&keys::player_solved(player), &level.to_string())
                .await?;
        }

        let log_key = keys::level_attempts(player, level);
        let json = serde_json::to_string(record)?;
        self.store.list_push(&log_key, &json).await?;
        self.store.expire(&log_key, self.state_ttl).await?;
        Ok(())
    }

    /// Read the full attempt log for one level, oldest first. Entries that
    /// fail to parse are skipped. Refreshes the log's retention window.
    pub async fn attempt_log(
        &self,
        player: &str,
        level: u32,
    ) -> Result<Vec<AttemptRecord>, GameError> {
        let log_key = keys::level_attempts(player, level);
        let raw = self.store.list_range(&log_key, 0, -1).await?;
        self.store.expire(&log_key, self.state_ttl).await?;
        Ok(raw
            .iter()
            .filter_map(|item| serde_json::from_str(item).ok())
            .collect())
    }

    /// Refresh the retention window on the player's solved set and attempt
    /// counters. Called on every interaction so active players never expire.
    pub async fn touch(&self, player: &str) -> Result<(), GameError> {
        self.store
            .expire(&keys::player_solved(player), self.state_ttl)
            .await?;
        self.store
            .expire(&keys::player_attempts(player), self.state_ttl)
            .await?;
        Ok(())
    }
}
