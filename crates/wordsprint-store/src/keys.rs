//! The namespaced key schema.
//!
//! Every key the game writes is prefixed with `wsp` and colon-joined.
//!
//! | Pattern | Type | Description |
//! |---------|------|-------------|
//! | `wsp:p:{pid}:solved` | Set | Level ordinals the player has solved |
//! | `wsp:p:{pid}:att` | Hash | Attempt counter per level ordinal |
//! | `wsp:p:{pid}:lvl:{n}:attempts` | List | JSON attempt records, append-only |
//! | `wsp:cd:sid:{sid}` | String | Cooldown lock keyed by session id |
//! | `wsp:cd:ip:{addr}` | String | Cooldown lock keyed by network address |
//! | `wsp:bot:start` | String | Bot start epoch (seconds), set once |
//! | `wsp:bot:progress` | String | Persisted bot progress fraction in [0,1] |

/// Key of the global bot start-epoch record.
pub const BOT_START: &str = "wsp:bot:start";

/// Key of the global persisted bot progress fraction.
pub const BOT_PROGRESS: &str = "wsp:bot:progress";

/// Set of level ordinals the player has solved.
pub fn player_solved(player: &str) -> String {
    format!("wsp:p:{player}:solved")
}

/// Hash mapping level ordinal to attempts consumed.
pub fn player_attempts(player: &str) -> String {
    format!("wsp:p:{player}:att")
}

/// Append-only list of JSON attempt records for one level.
pub fn level_attempts(player: &str, level: u32) -> String {
    format!("wsp:p:{player}:lvl:{level}:attempts")
}

/// Cooldown lock keyed by session identifier.
pub fn cooldown_session(sid: &str) -> String {
    format!("wsp:cd:sid:{sid}")
}

/// Cooldown lock keyed by network address.
pub fn cooldown_addr(addr: &str) -> String {
    format!("wsp:cd:ip:{addr}")
}
