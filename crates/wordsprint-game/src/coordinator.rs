//! Orchestration of one guess submission.
//!
//! [`GuessCoordinator`] is the only entry point that mutates game state.
//! It consults every other component in a fixed order; each store touch is
//! a single atomic operation, and two of the resulting sequences are
//! deliberately not transactional:
//!
//! - *check attempts-used, then increment*: two concurrent requests for the
//!   same player and level can both observe `used < max` before either
//!   increments, letting attempts exceed the ceiling by a small margin
//!   under contention. Accepted baseline behavior.
//! - *solved-set update, then attempt-log append*: a store failure between
//!   them can leave one without the other; solved status can be recomputed
//!   from the log if stronger consistency is ever needed.

use std::sync::Arc;

use serde::Serialize;
use wordsprint_store::KvStore;
use wordsprint_types::{AttemptRecord, LetterMark};

use crate::bot::BotSimulator;
use crate::config::GameConfig;
use crate::cooldown::CooldownLimiter;
use crate::dictionary::DictionaryOracle;
use crate::error::GameError;
use crate::progression::Progression;
use crate::scoring;

/// The scored result of an accepted guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessOutcome {
    /// The level the guess was scored against.
    pub level: u32,
    /// The normalized (uppercase) guess.
    pub guess: String,
    /// Per-letter outcome.
    pub result: Vec<LetterMark>,
    /// Whether the guess solved the level.
    pub is_correct: bool,
}

/// Coordinates a single guess submission end to end.
///
/// Cheap to clone; all clones share the same store handle.
#[derive(Clone)]
pub struct GuessCoordinator<S: KvStore> {
    config: Arc<GameConfig>,
    dictionary: Arc<dyn DictionaryOracle>,
    progression: Progression<S>,
    cooldown: CooldownLimiter<S>,
    bot: BotSimulator<S>,
}

impl<S: KvStore> GuessCoordinator<S> {
    /// Wire up the coordinator and its components around one store handle.
    pub fn new(config: Arc<GameConfig>, store: S, dictionary: Arc<dyn DictionaryOracle>) -> Self {
        let progression = Progression::new(store.clone(), config.state_ttl());
        let cooldown = CooldownLimiter::new(store.clone(), config.cooldown());
        let bot = BotSimulator::new(store, config.bot_duration_seconds);
        Self {
            config,
            dictionary,
            progression,
            cooldown,
            bot,
        }
    }

    /// The per-player progression view (shared with the read-only API).
    pub const fn progression(&self) -> &Progression<S> {
        &self.progression
    }

    /// The bot simulator (shared with the read-only API).
    pub const fn bot(&self) -> &BotSimulator<S> {
        &self.bot
    }

    /// The game configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Submit one guess for `player` at wall-clock time `now` (epoch
    /// seconds). `session` and `addr` key the cooldown limiter; `player` is
    /// the opaque identity the progression state is stored under.
    ///
    /// Checks run in strict order: shape, cooldown, bot, progression,
    /// attempt budget, dictionary, lock acquisition, and only then the
    /// mutations. An invalid or unrecognized word costs the player nothing.
    pub async fn submit(
        &self,
        player: &str,
        session: Option<&str>,
        addr: &str,
        level: u32,
        raw_guess: &str,
        now: i64,
    ) -> Result<GuessOutcome, GameError> {
        // 1. Shape validation; no state touched on violation.
        let total = self.config.total_levels();
        let target = self.config.target(level).ok_or(GameError::InvalidLevel)?;
        let guess = raw_guess.trim().to_ascii_uppercase();
        if guess.is_empty() || !guess.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(GameError::NotLetters);
        }
        if guess.chars().count() != target.chars().count() {
            return Err(GameError::InvalidLength {
                expected: target.chars().count(),
            });
        }

        // 2. Cooldown from a previously accepted guess blocks early.
        let retry_after = self.cooldown.time_remaining(session, addr).await?;
        if retry_after > 0 {
            return Err(GameError::Cooldown { retry_after });
        }

        // 3. Once the bot has finished, the round is over for everyone.
        if self.bot.solved_count(total, now).await? >= total {
            return Err(GameError::BotFinished);
        }

        // 4. Sequential unlock: only the next unsolved level is playable.
        let solved = self.progression.solved_levels(player).await?;
        if solved.contains(&level) {
            return Err(GameError::AlreadySolved);
        }
        if level != Progression::<S>::next_unlocked_level(&solved, total) {
            return Err(GameError::LockedLevel);
        }

        // 5. Attempt budget.
        let used = self.progression.attempts_used(player, level).await?;
        if used >= self.config.max_attempts {
            return Err(GameError::AttemptsExhausted);
        }

        self.progression.touch(player).await?;

        // 6. Dictionary check before any mutation: a nonsense word consumes
        //    neither an attempt nor the cooldown.
        if !self.dictionary.contains(&guess) {
            return Err(GameError::NotAWord);
        }

        // 7. Acquire the cooldown lock; losing the race to a concurrent
        //    request is reported as a rate limit with a concrete wait.
        if !self.cooldown.try_acquire(session, addr).await? {
            let remaining = self.cooldown.time_remaining(session, addr).await?;
            let retry_after = if remaining > 0 {
                remaining
            } else {
                self.cooldown.cooldown_seconds()
            };
            return Err(GameError::Cooldown { retry_after });
        }

        // 8. Consume the attempt. Not atomic with the check in step 5: under
        //    contention the counter can overshoot max_attempts slightly.
        let used = self.progression.consume_attempt(player, level).await?;

        // 9. Score.
        let result = scoring::score(target, &guess);
        let record = AttemptRecord::new(guess.clone(), result);

        // 10. Record the outcome (solved-set update first when correct).
        self.progression.record_attempt(player, level, &record).await?;
        self.progression.touch(player).await?;

        tracing::debug!(
            player,
            level,
            attempt = used,
            is_correct = record.is_correct,
            "guess recorded"
        );

        Ok(GuessOutcome {
            level,
            guess: record.guess,
            result: record.result,
            is_correct: record.is_correct,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects, clippy::panic)]
mod tests {
    use wordsprint_store::{MemoryStore, keys};
    use wordsprint_types::LetterMark;

    use super::*;
    use crate::dictionary::WordList;

    const T0: i64 = 1_700_000_000;

    fn oracle() -> Arc<dyn DictionaryOracle> {
        Arc::new(WordList::from_words([
            "TRUCK", "TRACK", "TRICK", "SPICE", "PIECE", "PLANE", "COMBINE", "TRIAL",
        ]))
    }

    fn coordinator(store: &MemoryStore) -> GuessCoordinator<MemoryStore> {
        GuessCoordinator::new(Arc::new(GameConfig::default()), store.clone(), oracle())
    }

    fn coordinator_with(
        store: &MemoryStore,
        config: GameConfig,
    ) -> GuessCoordinator<MemoryStore> {
        GuessCoordinator::new(Arc::new(config), store.clone(), oracle())
    }

    #[tokio::test]
    async fn correct_guess_solves_the_level() {
        let store = MemoryStore::new();
        let coord = coordinator(&store);

        let outcome = coord
            .submit("alice", Some("sid"), "1.2.3.4", 1, "truck", T0)
            .await
            .unwrap();
        assert!(outcome.is_correct);
        assert_eq!(outcome.guess, "TRUCK");
        assert_eq!(outcome.result, vec![LetterMark::Correct; 5]);

        let solved = coord.progression().solved_levels("alice").await.unwrap();
        assert!(solved.contains(&1));
        assert_eq!(coord.progression().attempts_used("alice", 1).await.unwrap(), 1);
        assert_eq!(coord.progression().attempt_log("alice", 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn wrong_valid_word_consumes_an_attempt() {
        let store = MemoryStore::new();
        let coord = coordinator(&store);

        let outcome = coord
            .submit("alice", Some("sid"), "1.2.3.4", 1, "TRACK", T0)
            .await
            .unwrap();
        assert!(!outcome.is_correct);
        assert_eq!(coord.progression().attempts_used("alice", 1).await.unwrap(), 1);
        assert!(coord.progression().solved_levels("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unrecognized_word_costs_nothing() {
        let store = MemoryStore::new();
        let coord = coordinator(&store);

        let err = coord
            .submit("alice", Some("sid"), "1.2.3.4", 1, "ZXQWV", T0)
            .await
            .unwrap_err();
        assert!(matches!(err, GameError::NotAWord));

        // No attempt consumed, no cooldown set.
        assert_eq!(coord.progression().attempts_used("alice", 1).await.unwrap(), 0);
        let second = coord
            .submit("alice", Some("sid"), "1.2.3.4", 1, "TRACK", T0)
            .await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn shape_violations_are_distinct() {
        let store = MemoryStore::new();
        let coord = coordinator(&store);

        assert!(matches!(
            coord.submit("alice", None, "a", 0, "TRUCK", T0).await.unwrap_err(),
            GameError::InvalidLevel
        ));
        assert!(matches!(
            coord.submit("alice", None, "a", 99, "TRUCK", T0).await.unwrap_err(),
            GameError::InvalidLevel
        ));
        assert!(matches!(
            coord.submit("alice", None, "a", 1, "TRUC1", T0).await.unwrap_err(),
            GameError::NotLetters
        ));
        assert!(matches!(
            coord.submit("alice", None, "a", 1, "CAB", T0).await.unwrap_err(),
            GameError::InvalidLength { expected: 5 }
        ));
    }

    #[tokio::test]
    async fn second_guess_within_cooldown_is_rate_limited() {
        let store = MemoryStore::new();
        let coord = coordinator(&store);

        coord
            .submit("alice", Some("sid"), "1.2.3.4", 1, "TRACK", T0)
            .await
            .unwrap();
        let err = coord
            .submit("alice", Some("sid"), "1.2.3.4", 1, "TRICK", T0)
            .await
            .unwrap_err();
        match err {
            GameError::Cooldown { retry_after } => {
                assert!(retry_after > 0 && retry_after <= 3);
            }
            other => panic!("expected cooldown, got {other:?}"),
        }
        // The blocked guess consumed nothing.
        assert_eq!(coord.progression().attempts_used("alice", 1).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn skipping_ahead_is_locked() {
        let store = MemoryStore::new();
        let coord = coordinator(&store);

        let err = coord
            .submit("alice", None, "1.2.3.4", 2, "COMBINE", T0)
            .await
            .unwrap_err();
        assert!(matches!(err, GameError::LockedLevel));
    }

    #[tokio::test]
    async fn resolving_a_solved_level_conflicts_without_rescoring() {
        let store = MemoryStore::new();
        let coord = coordinator(&store);

        coord
            .submit("alice", Some("s1"), "1.1.1.1", 1, "TRUCK", T0)
            .await
            .unwrap();

        // Different cooldown keys, same player: the conflict is about the
        // solved set, not the rate limiter.
        let err = coord
            .submit("alice", Some("s2"), "2.2.2.2", 1, "TRUCK", T0)
            .await
            .unwrap_err();
        assert!(matches!(err, GameError::AlreadySolved));
        assert_eq!(coord.progression().attempt_log("alice", 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn attempts_exhausted_after_budget_spent() {
        let store = MemoryStore::new();
        let config = GameConfig {
            max_attempts: 2,
            ..GameConfig::default()
        };
        let coord = coordinator_with(&store, config);

        coord
            .submit("alice", Some("s1"), "1.1.1.1", 1, "TRACK", T0)
            .await
            .unwrap();
        coord
            .submit("alice", Some("s2"), "2.2.2.2", 1, "TRICK", T0)
            .await
            .unwrap();

        let err = coord
            .submit("alice", Some("s3"), "3.3.3.3", 1, "TRUCK", T0)
            .await
            .unwrap_err();
        assert!(matches!(err, GameError::AttemptsExhausted));
        assert_eq!(coord.progression().attempts_used("alice", 1).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn bot_finish_ends_the_round_for_everyone() {
        let store = MemoryStore::new();
        store.set(keys::BOT_START, &T0.to_string()).await.unwrap();
        let coord = coordinator(&store);

        // Default duration is one hour; two hours later the bot is done.
        let err = coord
            .submit("alice", Some("sid"), "1.2.3.4", 1, "TRUCK", T0 + 7200)
            .await
            .unwrap_err();
        assert!(matches!(err, GameError::BotFinished));
    }

    #[tokio::test]
    async fn solving_unlocks_the_next_level() {
        let store = MemoryStore::new();
        let coord = coordinator(&store);

        coord
            .submit("alice", Some("s1"), "1.1.1.1", 1, "TRUCK", T0)
            .await
            .unwrap();
        let outcome = coord
            .submit("alice", Some("s2"), "2.2.2.2", 2, "COMBINE", T0)
            .await
            .unwrap();
        assert!(outcome.is_correct);

        let solved = coord.progression().solved_levels("alice").await.unwrap();
        assert_eq!(solved, [1, 2].into_iter().collect());
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_unavailability() {
        let store = MemoryStore::new();
        let coord = coordinator(&store);

        // A plain string where the solved set should live makes every
        // progression read fail with a wrong-type error.
        store
            .set(&keys::player_solved("alice"), "oops")
            .await
            .unwrap();

        let err = coord
            .submit("alice", Some("sid"), "1.2.3.4", 1, "TRUCK", T0)
            .await
            .unwrap_err();
        assert!(matches!(err, GameError::Store(_)));
    }

    #[tokio::test]
    async fn players_do_not_share_progression() {
        let store = MemoryStore::new();
        let coord = coordinator(&store);

        coord
            .submit("alice", Some("s1"), "1.1.1.1", 1, "TRUCK", T0)
            .await
            .unwrap();
        assert!(coord.progression().solved_levels("bob").await.unwrap().is_empty());
        // Bob still starts at level 1.
        let err = coord
            .submit("bob", Some("s2"), "2.2.2.2", 2, "COMBINE", T0)
            .await
            .unwrap_err();
        assert!(matches!(err, GameError::LockedLevel));
    }
}
