//! Bot progress snapshot.

use serde::{Deserialize, Serialize};

/// A point-in-time view of the simulated opponent's progress.
///
/// Shared by all players; embedded in every state response so clients can
/// render the race without a separate endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotSnapshot {
    /// Number of levels the bot has "solved" so far.
    pub solved: u32,
    /// Total number of levels in the game.
    pub total: u32,
    /// Wall-clock seconds until the bot finishes the last level.
    pub seconds_left: u64,
    /// Whether the bot has finished every level. Once true, the round is
    /// over and all further guesses are rejected.
    pub finished: bool,
}
