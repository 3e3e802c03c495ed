//! Immutable, validated game configuration.
//!
//! Constructed once at process start (deserialized from the server's YAML
//! config file) and passed by `Arc` to the components that need it. All
//! duration constants live here; nothing reads the environment at request
//! time.

use std::time::Duration;

use serde::Deserialize;
use wordsprint_types::LevelInfo;

/// Errors produced by [`GameConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum GameConfigError {
    /// A configured value is outside its valid range.
    #[error("invalid game configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// The fixed rules of one Wordsprint deployment.
///
/// The word list defines the level sequence: level `n` targets the word at
/// index `n - 1`. Immutable for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Ordered target words, one per level, uppercase A-Z.
    #[serde(default = "default_words")]
    pub words: Vec<String>,

    /// Maximum attempts per level, shared across levels.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Minimum spacing between accepted guesses, in seconds.
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: u64,

    /// Wall-clock seconds the bot takes to finish every level.
    #[serde(default = "default_bot_duration_seconds")]
    pub bot_duration_seconds: u64,

    /// Retention window for per-player state, refreshed on each interaction.
    #[serde(default = "default_state_ttl_seconds")]
    pub state_ttl_seconds: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            words: default_words(),
            max_attempts: default_max_attempts(),
            cooldown_seconds: default_cooldown_seconds(),
            bot_duration_seconds: default_bot_duration_seconds(),
            state_ttl_seconds: default_state_ttl_seconds(),
        }
    }
}

impl GameConfig {
    /// Check every field against its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`GameConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), GameConfigError> {
        if self.words.is_empty() {
            return Err(invalid("at least one target word must be configured"));
        }
        for word in &self.words {
            if word.is_empty() || !word.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(invalid(&format!(
                    "target words must be uppercase A-Z, got {word:?}"
                )));
            }
        }
        if self.max_attempts == 0 {
            return Err(invalid("max_attempts must be at least 1"));
        }
        if self.cooldown_seconds == 0 {
            return Err(invalid("cooldown_seconds must be at least 1"));
        }
        if self.bot_duration_seconds == 0 {
            return Err(invalid("bot_duration_seconds must be at least 1"));
        }
        if self.state_ttl_seconds < 60 {
            return Err(invalid("state_ttl_seconds must be at least 60"));
        }
        Ok(())
    }

    /// Number of levels in the fixed sequence.
    pub fn total_levels(&self) -> u32 {
        u32::try_from(self.words.len()).unwrap_or(u32::MAX)
    }

    /// The target word for a 1-based level ordinal, if in range.
    pub fn target(&self, level: u32) -> Option<&str> {
        let index = usize::try_from(level.checked_sub(1)?).ok()?;
        self.words.get(index).map(String::as_str)
    }

    /// Public level descriptors for `GET /api/levels`.
    pub fn level_infos(&self) -> Vec<LevelInfo> {
        self.words
            .iter()
            .enumerate()
            .map(|(i, word)| LevelInfo {
                level: u32::try_from(i).unwrap_or(u32::MAX).saturating_add(1),
                length: u32::try_from(word.chars().count()).unwrap_or(u32::MAX),
                max_attempts: self.max_attempts,
            })
            .collect()
    }

    /// The cooldown window as a [`Duration`].
    pub const fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_seconds)
    }

    /// The per-player retention window as a [`Duration`].
    pub const fn state_ttl(&self) -> Duration {
        Duration::from_secs(self.state_ttl_seconds)
    }
}

fn invalid(reason: &str) -> GameConfigError {
    GameConfigError::Invalid {
        reason: reason.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_words() -> Vec<String> {
    [
        "TRUCK", "COMBINE", "TRIAL", "REVIEW", "RESEMBLE", "SPICE", "QUEUE", "LUCKY", "PLANE",
        "RADAR", "IMPROVE", "EXCESS",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

const fn default_max_attempts() -> u32 {
    6
}

const fn default_cooldown_seconds() -> u64 {
    3
}

const fn default_bot_duration_seconds() -> u64 {
    60 * 60
}

const fn default_state_ttl_seconds() -> u64 {
    12 * 60 * 60
}
