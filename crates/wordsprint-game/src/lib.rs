//! Game core for the Wordsprint word-race server.
//!
//! Players progress sequentially through a fixed ordered list of target
//! words, submitting Wordle-style letter guesses, while a simulated bot
//! opponent advances on a wall-clock schedule and ends the round for
//! everyone if it finishes first.
//!
//! All cross-request state lives behind the
//! [`KvStore`](wordsprint_store::KvStore) trait; the store's single-key
//! atomicity is the only synchronization primitive. The
//! [`GuessCoordinator`] is the sole entry point that mutates game state.
//!
//! # Modules
//!
//! - [`scoring`] -- Pure two-pass guess scoring
//! - [`progression`] -- Per-player solved sets and attempt accounting
//! - [`cooldown`] -- Dual-key (session + address) guess rate limiter
//! - [`bot`] -- Global monotonic bot progress simulation
//! - [`coordinator`] -- Orchestration of one guess submission
//! - [`dictionary`] -- The "is this a real word" oracle boundary
//! - [`config`] -- Immutable, validated game configuration
//! - [`error`] -- The error taxonomy for a guess submission

pub mod bot;
pub mod config;
pub mod cooldown;
pub mod coordinator;
pub mod dictionary;
pub mod error;
pub mod progression;
pub mod scoring;

// Re-export primary types for convenience.
pub use bot::BotSimulator;
pub use config::{GameConfig, GameConfigError};
pub use cooldown::CooldownLimiter;
pub use coordinator::{GuessCoordinator, GuessOutcome};
pub use dictionary::{DictionaryOracle, WordList};
pub use error::GameError;
pub use progression::Progression;
pub use scoring::score;
