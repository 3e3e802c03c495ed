//! HTTP API server for the Wordsprint word-race game.
//!
//! This crate owns everything at the HTTP boundary: Axum routing, the
//! sid-cookie session middleware, the network-address fallback identity,
//! the word-list dictionary, and the mapping from
//! [`GameError`](wordsprint_game::GameError) to HTTP status codes.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/health` | Liveness check |
//! | `GET` | `/api/levels` | The fixed level sequence |
//! | `GET` | `/api/state` | Player + bot state (`?full=true` adds levels) |
//! | `GET` | `/api/level_state` | Attempt history for one unlocked level |
//! | `POST` | `/api/guess` | Submit one guess |

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod session;
pub mod state;
pub mod words;

// Re-export primary types for convenience.
pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
