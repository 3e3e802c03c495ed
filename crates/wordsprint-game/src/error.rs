//! The error taxonomy for a guess submission.
//!
//! Four distinct classes, which callers must not collapse:
//!
//! - **Validation** (client-caused, nothing mutated): [`GameError::InvalidLevel`],
//!   [`GameError::InvalidLength`], [`GameError::NotLetters`], [`GameError::NotAWord`]
//! - **State conflict** (business rule, nothing mutated): [`GameError::LockedLevel`],
//!   [`GameError::AlreadySolved`], [`GameError::AttemptsExhausted`],
//!   [`GameError::BotFinished`]
//! - **Rate limit** (retryable, carries a wait): [`GameError::Cooldown`]
//! - **Infrastructure**: [`GameError::Store`], [`GameError::Serialization`]
//!
//! Errors are local to one submission; nothing is retried inside the core.

use wordsprint_store::StoreError;

/// Errors that can occur while handling a guess submission.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The level ordinal is outside `1..=total`.
    #[error("invalid level")]
    InvalidLevel,

    /// The guess length does not match the target word length.
    #[error("invalid guess length (expected {expected})")]
    InvalidLength {
        /// The target word's length in letters.
        expected: usize,
    },

    /// The guess contains characters other than letters.
    #[error("guess must contain only letters")]
    NotLetters,

    /// The guess is not a recognized dictionary word.
    #[error("not in word list")]
    NotAWord,

    /// The level is not the player's next unlocked level.
    #[error("locked level")]
    LockedLevel,

    /// The player already solved this level; re-solving is disallowed.
    #[error("already solved")]
    AlreadySolved,

    /// The player has consumed every attempt for this level.
    #[error("no attempts left")]
    AttemptsExhausted,

    /// The bot finished every level; the round is over for all players.
    #[error("bot finished")]
    BotFinished,

    /// A cooldown is active (or a concurrent request won the lock race).
    #[error("cooldown active, retry after {retry_after}s")]
    Cooldown {
        /// Seconds until another guess will be accepted.
        retry_after: u64,
    },

    /// The state store failed or timed out; the whole operation aborts.
    #[error("state store unavailable: {0}")]
    Store(#[from] StoreError),

    /// A stored record could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
