//! Wordsprint API server binary.
//!
//! Entry point that wires together configuration, the Redis-backed store,
//! the dictionary oracle, and the HTTP router.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `wordsprint-config.yaml`
//! 3. Connect to the Redis state store
//! 4. Build the dictionary oracle (configured file or embedded list)
//! 5. Assemble application state and serve HTTP

use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use wordsprint_game::{DictionaryOracle, WordList};
use wordsprint_server::config::{DictionaryConfig, ServerConfig};
use wordsprint_server::state::AppState;
use wordsprint_server::{server, words};
use wordsprint_store::RedisStore;

/// Application entry point for the Wordsprint server.
///
/// # Errors
///
/// Returns an error if configuration loading, the store connection, or
/// the HTTP server fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("wordsprint-server starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        host = config.http.host,
        port = config.http.port,
        total_levels = config.game.total_levels(),
        max_attempts = config.game.max_attempts,
        cooldown_seconds = config.game.cooldown_seconds,
        bot_duration_seconds = config.game.bot_duration_seconds,
        "Configuration loaded"
    );

    // 3. Connect to the state store.
    info!(redis_url = config.store.redis_url, "Connecting to Redis");
    let store = RedisStore::connect(&config.store.redis_url, config.store.command_timeout()).await?;
    info!("State store connected");

    // 4. Build the dictionary oracle.
    let dictionary = load_dictionary(&config.dictionary)?;
    info!(word_count = dictionary.len(), "Dictionary loaded");

    // 5. Assemble state and serve.
    let dictionary: Arc<dyn DictionaryOracle> = Arc::new(dictionary);
    let state = Arc::new(AppState::new(
        Arc::new(config.game.clone()),
        store,
        dictionary,
    ));

    server::start_server(&config.http, state).await?;

    Ok(())
}

/// Load the server configuration from `wordsprint-config.yaml`.
///
/// Looks for the config file relative to the current working directory.
/// If the file does not exist, defaults are used.
fn load_config() -> Result<ServerConfig, wordsprint_server::ConfigError> {
    let config_path = Path::new("wordsprint-config.yaml");
    if config_path.exists() {
        ServerConfig::from_file(config_path)
    } else {
        info!("Config file not found, using defaults");
        // Defaults still pass through environment overrides.
        ServerConfig::parse("")
    }
}

/// Build the word list from the configured file, falling back to the
/// embedded list when no path is set.
fn load_dictionary(config: &DictionaryConfig) -> Result<WordList, std::io::Error> {
    config.word_list_path.as_ref().map_or_else(
        || Ok(words::default_word_list()),
        |path| {
            info!(path = %path.display(), "Loading word list from file");
            WordList::from_file(path)
        },
    )
}
