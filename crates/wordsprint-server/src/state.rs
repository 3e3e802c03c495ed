//! Shared application state for the API server.
//!
//! [`AppState`] holds the [`GuessCoordinator`] (which in turn owns the
//! store handle and every game component). Wrapped in [`Arc`] and injected
//! via Axum's `State` extractor; there is no other in-process shared
//! mutable state -- the key-value store is the only synchronization point.

use std::sync::Arc;

use wordsprint_game::{DictionaryOracle, GameConfig, GuessCoordinator};
use wordsprint_store::KvStore;

/// Shared state for the Axum application, generic over the store backing.
pub struct AppState<S: KvStore> {
    /// The sole entry point that mutates game state.
    pub coordinator: GuessCoordinator<S>,
}

impl<S: KvStore> AppState<S> {
    /// Wire the application state around one store handle.
    pub fn new(config: Arc<GameConfig>, store: S, dictionary: Arc<dyn DictionaryOracle>) -> Self {
        Self {
            coordinator: GuessCoordinator::new(config, store, dictionary),
        }
    }

    /// The game configuration.
    pub fn config(&self) -> &GameConfig {
        self.coordinator.config()
    }
}
