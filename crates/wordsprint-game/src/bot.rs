//! Global monotonic bot progress simulation.
//!
//! The bot is process-wide, owned by no player. Its state is two store
//! keys: a start epoch fixed by the first observer (set-if-absent, so
//! concurrent first observers agree) and a persisted progress fraction in
//! `[0, 1]` that only ever increases. Progress is a pure function of
//! elapsed wall-clock time, floored against the stored fraction, so a
//! later computation with a smaller `now` or a shortened duration can
//! never resurrect an earlier value.

use wordsprint_store::{KvStore, keys};
use wordsprint_types::BotSnapshot;

use crate::error::GameError;

/// The simulated opponent advancing on a fixed wall-clock schedule.
#[derive(Debug, Clone)]
pub struct BotSimulator<S> {
    store: S,
    duration_seconds: u64,
}

impl<S: KvStore> BotSimulator<S> {
    /// Create a simulator that finishes every level after
    /// `duration_seconds` of wall-clock time.
    pub const fn new(store: S, duration_seconds: u64) -> Self {
        Self { store, duration_seconds }
    }

    /// The bot's start epoch in seconds, fixing it to `now` on first
    /// observation. Set-if-absent, then re-read, so every concurrent first
    /// observer converges on one value.
    pub async fn start_epoch(&self, now: i64) -> Result<i64, GameError> {
        if let Some(raw) = self.store.get(keys::BOT_START).await?
            && let Ok(epoch) = raw.parse::<i64>()
        {
            return Ok(epoch);
        }

        self.store
            .set_nx(keys::BOT_START, &now.to_string(), None)
            .await?;
        let raw = self.store.get(keys::BOT_START).await?;
        Ok(raw.and_then(|s| s.parse::<i64>().ok()).unwrap_or(now))
    }

    /// The bot's effective progress fraction in `[0, 1]` at time `now`,
    /// persisting any advance so progress never regresses.
    async fn progress_fraction(&self, now: i64) -> Result<f64, GameError> {
        let start = self.start_epoch(now).await?;
        let elapsed = now.saturating_sub(start).max(0);
        let duration = self.duration_seconds.max(1);

        #[allow(clippy::cast_precision_loss)]
        let elapsed_fraction = ((elapsed as f64) / (duration as f64)).clamp(0.0, 1.0);

        // Stored fraction defaults to 0 when absent or corrupt.
        let stored = self
            .store
            .get(keys::BOT_PROGRESS)
            .await?
            .and_then(|raw| raw.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .map_or(0.0, |v| v.clamp(0.0, 1.0));

        let effective = stored.max(elapsed_fraction);
        if effective > stored {
            self.store
                .set(keys::BOT_PROGRESS, &effective.to_string())
                .await?;
        }
        Ok(effective)
    }

    /// Number of levels the bot has solved at time `now`, in
    /// `0..=total_levels`. The game is over for everyone once this reaches
    /// `total_levels`.
    pub async fn solved_count(&self, total_levels: u32, now: i64) -> Result<u32, GameError> {
        let fraction = self.progress_fraction(now).await?;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let solved = (fraction * f64::from(total_levels)).floor() as u32;
        Ok(solved.min(total_levels))
    }

    /// Wall-clock seconds until the bot finishes the last level (0 once
    /// finished).
    pub async fn seconds_remaining(&self, now: i64) -> Result<u64, GameError> {
        let start = self.start_epoch(now).await?;
        let elapsed = now.saturating_sub(start).max(0);
        let elapsed = u64::try_from(elapsed).unwrap_or(u64::MAX);
        Ok(self.duration_seconds.saturating_sub(elapsed))
    }

    /// A full snapshot for state responses.
    pub async fn snapshot(&self, total_levels: u32, now: i64) -> Result<BotSnapshot, GameError> {
        let solved = self.solved_count(total_levels, now).await?;
        let seconds_left = self.seconds_remaining(now).await?;
        Ok(BotSnapshot {
            solved,
            total: total_levels,
            seconds_left,
            finished: solved >= total_levels,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use wordsprint_store::MemoryStore;

    use super::*;

    const TOTAL: u32 = 12;
    const DURATION: u64 = 3600;
    const T0: i64 = 1_700_000_000;

    fn bot(store: &MemoryStore) -> BotSimulator<MemoryStore> {
        BotSimulator::new(store.clone(), DURATION)
    }

    #[tokio::test]
    async fn first_observation_fixes_the_start_epoch() {
        let store = MemoryStore::new();
        let bot = bot(&store);
        assert_eq!(bot.start_epoch(T0).await.unwrap(), T0);
        // A later observer does not move it.
        assert_eq!(bot.start_epoch(T0 + 500).await.unwrap(), T0);
    }

    #[tokio::test]
    async fn progress_tracks_elapsed_time() {
        let store = MemoryStore::new();
        let bot = bot(&store);
        assert_eq!(bot.solved_count(TOTAL, T0).await.unwrap(), 0);
        assert_eq!(bot.solved_count(TOTAL, T0 + 1800).await.unwrap(), 6);
        assert_eq!(bot.solved_count(TOTAL, T0 + 3600).await.unwrap(), TOTAL);
    }

    #[tokio::test]
    async fn progress_never_regresses_under_clock_skew() {
        let store = MemoryStore::new();
        store.set(keys::BOT_START, &T0.to_string()).await.unwrap();
        let bot = bot(&store);
        assert_eq!(bot.solved_count(TOTAL, T0 + 1800).await.unwrap(), 6);
        // Clock jumps backwards: the stored fraction holds the line.
        assert_eq!(bot.solved_count(TOTAL, T0 + 600).await.unwrap(), 6);
    }

    #[tokio::test]
    async fn finished_is_sticky() {
        let store = MemoryStore::new();
        store.set(keys::BOT_START, &T0.to_string()).await.unwrap();
        let bot = bot(&store);
        assert_eq!(bot.solved_count(TOTAL, T0 + 7200).await.unwrap(), TOTAL);
        assert_eq!(bot.solved_count(TOTAL, T0).await.unwrap(), TOTAL);

        let snap = bot.snapshot(TOTAL, T0).await.unwrap();
        assert!(snap.finished);
    }

    #[tokio::test]
    async fn corrupt_stored_progress_reads_as_zero() {
        let store = MemoryStore::new();
        store.set(keys::BOT_PROGRESS, "garbage").await.unwrap();
        let bot = bot(&store);
        assert_eq!(bot.solved_count(TOTAL, T0).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn a_reconfigured_duration_cannot_lower_progress() {
        let store = MemoryStore::new();
        store.set(keys::BOT_START, &T0.to_string()).await.unwrap();
        let long = BotSimulator::new(store.clone(), DURATION);
        assert_eq!(long.solved_count(TOTAL, T0 + 1800).await.unwrap(), 6);

        // Reconfigured with a much longer duration: elapsed fraction is now
        // smaller, but the stored value wins.
        let longer = BotSimulator::new(store.clone(), DURATION * 10);
        assert_eq!(longer.solved_count(TOTAL, T0 + 1800).await.unwrap(), 6);
    }

    #[tokio::test]
    async fn seconds_remaining_counts_down_to_zero() {
        let store = MemoryStore::new();
        let bot = bot(&store);
        assert_eq!(bot.seconds_remaining(T0).await.unwrap(), DURATION);
        assert_eq!(bot.seconds_remaining(T0 + 600).await.unwrap(), DURATION - 600);
        assert_eq!(bot.seconds_remaining(T0 + 9999).await.unwrap(), 0);
    }
}
