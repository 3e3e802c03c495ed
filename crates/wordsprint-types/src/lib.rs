//! Shared type definitions for the Wordsprint game server.
//!
//! This crate is the single source of truth for the plain data types that
//! cross crate boundaries in the Wordsprint workspace: per-letter scoring
//! marks, level descriptors, stored attempt records, and the bot progress
//! snapshot served to clients.
//!
//! # Modules
//!
//! - [`marks`] -- Per-letter scoring outcome for a guess
//! - [`level`] -- Immutable level descriptors
//! - [`attempt`] -- Append-only attempt records
//! - [`bot`] -- Bot progress snapshot

pub mod attempt;
pub mod bot;
pub mod level;
pub mod marks;

// Re-export all public types at crate root for convenience.
pub use attempt::AttemptRecord;
pub use bot::BotSnapshot;
pub use level::LevelInfo;
pub use marks::LetterMark;
