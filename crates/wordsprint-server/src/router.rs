//! Axum router construction.
//!
//! Assembles all routes into a single [`Router`] with the sid-cookie
//! middleware, CORS, and request tracing layers.

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use wordsprint_store::KvStore;

use crate::handlers;
use crate::session;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// CORS is configured to allow any origin for development. In production
/// this should be restricted.
pub fn build_router<S: KvStore>(state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index::<S>))
        .route("/health", get(handlers::health))
        // REST API
        .route("/api/levels", get(handlers::get_levels::<S>))
        .route("/api/state", get(handlers::get_state::<S>))
        .route("/api/level_state", get(handlers::get_level_state::<S>))
        .route("/api/guess", post(handlers::post_guess::<S>))
        .layer(middleware::from_fn(session::ensure_sid_cookie))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::header::{CONTENT_TYPE, COOKIE, RETRY_AFTER, SET_COOKIE};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use wordsprint_game::{GameConfig, WordList};
    use wordsprint_store::{MemoryStore, keys};

    use super::*;

    /// Router over a fresh in-memory store, returning the store for
    /// direct state seeding.
    fn test_app() -> (Router, MemoryStore) {
        let store = MemoryStore::new();
        let dictionary = Arc::new(WordList::from_words([
            "TRUCK", "TRACK", "TRICK", "COMBINE", "TRIAL",
        ]));
        let state = Arc::new(AppState::new(
            Arc::new(GameConfig::default()),
            store.clone(),
            dictionary,
        ));
        (build_router(state), store)
    }

    fn get(path: &str) -> Request<Body> {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    fn get_with_sid(path: &str, sid: &str) -> Request<Body> {
        Request::builder()
            .uri(path)
            .header(COOKIE, format!("sid={sid}"))
            .body(Body::empty())
            .unwrap()
    }

    fn guess(sid: &str, level: i64, word: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/guess")
            .header(CONTENT_TYPE, "application/json")
            .header(COOKIE, format!("sid={sid}"))
            .body(Body::from(format!(
                r#"{{"level":{level},"guess":"{word}"}}"#
            )))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (app, _) = test_app();
        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ok"], serde_json::json!(true));
    }

    #[tokio::test]
    async fn levels_lists_the_sequence() {
        let (app, _) = test_app();
        let response = app.oneshot(get("/api/levels")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["total"], serde_json::json!(12));
        assert_eq!(body["levels"][0]["level"], serde_json::json!(1));
        assert_eq!(body["levels"][0]["length"], serde_json::json!(5));
        assert_eq!(body["levels"][0]["max_attempts"], serde_json::json!(6));
    }

    #[tokio::test]
    async fn first_visit_receives_a_sid_cookie() {
        let (app, _) = test_app();
        let response = app.oneshot(get("/api/state")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(SET_COOKIE)
            .expect("missing sid cookie")
            .to_str()
            .unwrap()
            .to_owned();
        assert!(cookie.starts_with("sid="));
        assert!(cookie.contains("HttpOnly"));

        // A request that already has a sid gets no new cookie.
        let (app, _) = test_app();
        let response = app
            .oneshot(get_with_sid("/api/state", "abc"))
            .await
            .unwrap();
        assert!(response.headers().get(SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn guess_happy_path() {
        let (app, _) = test_app();
        let response = app.oneshot(guess("alice", 1, "truck")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["level"], serde_json::json!(1));
        assert_eq!(body["guess"], serde_json::json!("TRUCK"));
        assert_eq!(body["is_correct"], serde_json::json!(true));
        assert_eq!(
            body["result"],
            serde_json::json!(["correct"; 5].as_slice())
        );
    }

    #[tokio::test]
    async fn second_guess_in_window_is_429_with_retry_after() {
        let (app, _) = test_app();
        let response = app
            .clone()
            .oneshot(guess("alice", 1, "track"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(guess("alice", 1, "trick")).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let retry: u64 = response
            .headers()
            .get(RETRY_AFTER)
            .expect("missing Retry-After")
            .to_str()
            .unwrap()
            .parse()
            .unwrap();
        assert!(retry > 0 && retry <= 3);
        let body = body_json(response).await;
        assert!(body["retry_after"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn locked_level_is_403() {
        let (app, _) = test_app();
        let response = app.oneshot(guess("alice", 2, "combine")).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn already_solved_is_409() {
        let (app, store) = test_app();
        // Seed the solved set directly; no cooldown lock interferes.
        store
            .set_add(&keys::player_solved("alice"), "1")
            .await
            .unwrap();
        let response = app.oneshot(guess("alice", 1, "truck")).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn bad_shape_is_400() {
        let (app, _) = test_app();
        let response = app
            .clone()
            .oneshot(guess("alice", 99, "truck"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(guess("alice", 1, "cab"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // A plausible five-letter non-word.
        let response = app.oneshot(guess("alice", 1, "zxqwv")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn store_failure_is_503() {
        let (app, store) = test_app();
        // Corrupt the solved-set key so progression reads fail.
        store
            .set(&keys::player_solved("alice"), "oops")
            .await
            .unwrap();

        let response = app.oneshot(guess("alice", 1, "truck")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn bot_finished_is_403() {
        let (app, store) = test_app();
        // Start the bot two hours in the past; the default schedule is one.
        let past = chrono::Utc::now().timestamp() - 7200;
        store.set(keys::BOT_START, &past.to_string()).await.unwrap();

        let response = app.oneshot(guess("alice", 1, "truck")).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn state_reports_solved_levels_and_bot() {
        let (app, store) = test_app();
        store
            .set_add(&keys::player_solved("alice"), "1")
            .await
            .unwrap();
        store
            .set_add(&keys::player_solved("alice"), "2")
            .await
            .unwrap();

        let response = app
            .oneshot(get_with_sid("/api/state?full=true", "alice"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["player"]["solved_levels"], serde_json::json!([1, 2]));
        assert_eq!(body["bot"]["total"], serde_json::json!(12));
        assert_eq!(body["total"], serde_json::json!(12));
        assert!(body["levels"].is_array());
    }

    #[tokio::test]
    async fn level_state_shows_history_and_locks_later_levels() {
        let (app, _) = test_app();
        let response = app
            .clone()
            .oneshot(guess("alice", 1, "track"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(get_with_sid("/api/level_state?level=1", "alice"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["level"], serde_json::json!(1));
        assert_eq!(body["solved"], serde_json::json!(false));
        assert_eq!(body["attempts"][0]["guess"], serde_json::json!("TRACK"));

        // Level 3 is still locked for this player.
        let response = app
            .clone()
            .oneshot(get_with_sid("/api/level_state?level=3", "alice"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // Out-of-range ordinals are a client error.
        let response = app
            .oneshot(get_with_sid("/api/level_state?level=0", "alice"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
