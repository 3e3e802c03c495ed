//! Immutable level descriptors.

use serde::{Deserialize, Serialize};

/// Public description of one level in the fixed ordered sequence.
///
/// Deliberately omits the target word: this is the shape returned by
/// `GET /api/levels` and embedded in the full state response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    /// Ordinal position of the level, 1-based.
    pub level: u32,
    /// Length of the target word in letters.
    pub length: u32,
    /// Maximum number of attempts a player may spend on this level.
    pub max_attempts: u32,
}
