//! REST API endpoint handlers.
//!
//! All handlers resolve the caller's [`Identity`] (sid cookie or network
//! address), then read or mutate game state exclusively through the
//! components owned by [`AppState`]. Wall-clock time is sampled once per
//! request and threaded through, so the bot simulation sees one consistent
//! `now`.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use chrono::Utc;
use serde::Deserialize;
use wordsprint_game::{GameError, Progression};
use wordsprint_store::KvStore;

use crate::error::ApiError;
use crate::session::Identity;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query and body structs
// ---------------------------------------------------------------------------

/// Query parameters for `GET /api/state`.
#[derive(Debug, Deserialize)]
pub struct StateQuery {
    /// When true, include the level list and total in the response.
    #[serde(default)]
    pub full: bool,
}

/// Query parameters for `GET /api/level_state`.
#[derive(Debug, Deserialize)]
pub struct LevelStateQuery {
    /// The 1-based level ordinal to inspect.
    pub level: i64,
}

/// Body of `POST /api/guess`.
#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    /// The 1-based level ordinal the guess targets.
    pub level: i64,
    /// The guessed word (any case; normalized server-side).
    pub guess: String,
}

/// Current wall-clock time in epoch seconds.
fn now_epoch() -> i64 {
    Utc::now().timestamp()
}

/// Convert a client-supplied ordinal to `u32`, rejecting non-positive and
/// oversized values the same way an out-of-range level is rejected.
fn parse_level(level: i64) -> Result<u32, ApiError> {
    u32::try_from(level).map_err(|_| ApiError(GameError::InvalidLevel))
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness check.
#[allow(clippy::unused_async)] // handlers must be async for Axum routing
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

// ---------------------------------------------------------------------------
// GET /api/levels
// ---------------------------------------------------------------------------

/// The fixed level sequence: ordinal, word length, and attempt budget for
/// each level. Target words are never exposed.
#[allow(clippy::unused_async)] // handlers must be async for Axum routing
pub async fn get_levels<S: KvStore>(State(state): State<Arc<AppState<S>>>) -> impl IntoResponse {
    let config = state.config();
    Json(serde_json::json!({
        "total": config.total_levels(),
        "levels": config.level_infos(),
    }))
}

// ---------------------------------------------------------------------------
// GET /api/state
// ---------------------------------------------------------------------------

/// The caller's solved levels plus the bot's progress. With `?full=true`
/// the level list is included so a client can boot from one request.
pub async fn get_state<S: KvStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<StateQuery>,
    identity: Identity,
) -> Result<impl IntoResponse, ApiError> {
    let now = now_epoch();
    let config = state.config();
    let total = config.total_levels();
    let progression = state.coordinator.progression();

    let solved = progression.solved_levels(identity.player()).await?;
    progression.touch(identity.player()).await?;
    let bot = state.coordinator.bot().snapshot(total, now).await?;

    let solved: Vec<u32> = solved.into_iter().collect();
    let body = if query.full {
        serde_json::json!({
            "player": { "solved_levels": solved },
            "bot": bot,
            "total": total,
            "levels": config.level_infos(),
        })
    } else {
        serde_json::json!({
            "player": { "solved_levels": solved },
            "bot": bot,
        })
    };
    Ok(Json(body))
}

// ---------------------------------------------------------------------------
// GET /api/level_state
// ---------------------------------------------------------------------------

/// Attempt history for one level the caller may see: any solved level, or
/// the next unlocked one. Peeking at later levels is rejected.
pub async fn get_level_state<S: KvStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<LevelStateQuery>,
    identity: Identity,
) -> Result<impl IntoResponse, ApiError> {
    let now = now_epoch();
    let config = state.config();
    let total = config.total_levels();
    let level = parse_level(query.level)?;
    if level < 1 || level > total {
        return Err(ApiError(GameError::InvalidLevel));
    }

    let progression = state.coordinator.progression();
    let player = identity.player();

    let solved = progression.solved_levels(player).await?;
    let next_unlocked = Progression::<S>::next_unlocked_level(&solved, total);
    if level > next_unlocked && !solved.contains(&level) {
        return Err(ApiError(GameError::LockedLevel));
    }

    let attempts = progression.attempt_log(player, level).await?;
    progression.touch(player).await?;
    let bot = state.coordinator.bot().snapshot(total, now).await?;

    Ok(Json(serde_json::json!({
        "level": level,
        "max_attempts": config.max_attempts,
        "attempts": attempts,
        "solved": solved.contains(&level),
        "bot": bot,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/guess
// ---------------------------------------------------------------------------

/// Submit one guess. The coordinator enforces the full check order:
/// shape, cooldown, bot, unlock sequence, attempt budget, dictionary.
pub async fn post_guess<S: KvStore>(
    State(state): State<Arc<AppState<S>>>,
    identity: Identity,
    Json(request): Json<GuessRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let now = now_epoch();
    let level = parse_level(request.level)?;

    let outcome = state
        .coordinator
        .submit(
            identity.player(),
            identity.session.as_deref(),
            &identity.addr,
            level,
            &request.guess,
            now,
        )
        .await?;
    Ok(Json(outcome))
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing the bot's progress and API links.
pub async fn index<S: KvStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Html<String>, ApiError> {
    let now = now_epoch();
    let total = state.config().total_levels();
    let bot = state.coordinator.bot().snapshot(total, now).await?;
    let status = if bot.finished { "ROUND OVER" } else { "RUNNING" };

    Ok(Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Wordsprint</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 720px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        .status {{ color: #3fb950; font-weight: bold; }}
    </style>
</head>
<body>
    <h1>Wordsprint</h1>
    <p class="subtitle">Race the bot through the word list</p>

    <p>Status: <span class="status">{status}</span></p>

    <div>
        <div class="metric">
            <div class="label">Bot solved</div>
            <div class="value">{solved} / {total}</div>
        </div>
        <div class="metric">
            <div class="label">Seconds left</div>
            <div class="value">{seconds_left}</div>
        </div>
    </div>

    <h2>API Endpoints</h2>
    <ul>
        <li>GET <a href="/api/levels">/api/levels</a> -- the level sequence</li>
        <li>GET <a href="/api/state">/api/state</a> -- your progress and the bot's</li>
        <li>GET <a href="/api/level_state?level=1">/api/level_state?level=N</a> -- attempt history</li>
        <li>POST /api/guess -- submit a guess {{"level": 1, "guess": "..."}}</li>
    </ul>
</body>
</html>"#,
        solved = bot.solved,
        seconds_left = bot.seconds_left,
    )))
}
