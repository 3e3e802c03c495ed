//! Configuration loading for the Wordsprint server.
//!
//! The canonical configuration lives in `wordsprint-config.yaml` at the
//! project root. This module defines strongly-typed structs mirroring the
//! YAML structure and a loader that reads, applies environment overrides,
//! and validates once at startup. Components receive the resulting structs
//! by reference; nothing re-reads the environment at request time.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use wordsprint_game::{GameConfig, GameConfigError};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        #[from]
        source: serde_yml::Error,
    },

    /// The game section failed range validation.
    #[error(transparent)]
    Game(#[from] GameConfigError),

    /// An environment override did not parse.
    #[error("invalid environment override {name}: {value}")]
    EnvOverride {
        /// The environment variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Top-level server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// State store connection settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// The fixed game rules (words, attempts, cooldown, bot schedule).
    #[serde(default)]
    pub game: GameConfig,

    /// Dictionary oracle settings.
    #[serde(default)]
    pub dictionary: DictionaryConfig,
}

impl ServerConfig {
    /// Load configuration from a YAML file, apply environment overrides,
    /// and validate.
    ///
    /// Overrides: `REDIS_URL` (store URL), `WORDSPRINT_PORT` (listen port),
    /// `BOT_DURATION_SECONDS` (bot schedule).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, the YAML does
    /// not parse, an override is malformed, or validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, apply environment
    /// overrides, and validate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on parse, override, or validation failure.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document is a valid configuration: all defaults.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides()?;
        config.game.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("REDIS_URL") {
            self.store.redis_url = val;
        }
        if let Ok(val) = std::env::var("WORDSPRINT_PORT") {
            self.http.port = val.parse().map_err(|_| ConfigError::EnvOverride {
                name: "WORDSPRINT_PORT",
                value: val,
            })?;
        }
        if let Ok(val) = std::env::var("BOT_DURATION_SECONDS") {
            self.game.bot_duration_seconds =
                val.parse().map_err(|_| ConfigError::EnvOverride {
                    name: "BOT_DURATION_SECONDS",
                    value: val,
                })?;
        }
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// State store connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// Redis URL (`redis://host:port` or `redis://host:port/db`).
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Per-command timeout in milliseconds; a slow store fails fast.
    #[serde(default = "default_command_timeout_ms")]
    pub command_timeout_ms: u64,
}

impl StoreConfig {
    /// The per-command timeout as a [`Duration`].
    pub const fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            redis_url: default_redis_url(),
            command_timeout_ms: default_command_timeout_ms(),
        }
    }
}

/// Dictionary oracle settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DictionaryConfig {
    /// Optional newline-separated word-list file. When unset, the embedded
    /// common-word list is used.
    #[serde(default)]
    pub word_list_path: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8080
}

fn default_redis_url() -> String {
    "redis://localhost:6379/0".to_owned()
}

const fn default_command_timeout_ms() -> u64 {
    2000
}
