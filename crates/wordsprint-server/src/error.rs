//! Error-to-response mapping for the API layer.
//!
//! [`ApiError`] wraps the core [`GameError`] and converts it into an HTTP
//! response via [`IntoResponse`]. The four error classes stay distinct on
//! the wire:
//!
//! - validation -> `400`
//! - state conflict -> `403` (already-solved specifically -> `409`)
//! - rate limit -> `429` with a `Retry-After` header
//! - store unavailability -> `503`

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use wordsprint_game::GameError;

/// An API-layer error carrying the core error it wraps.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(
    /// The core error this response is derived from.
    #[from]
    pub GameError,
);

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            GameError::InvalidLevel
            | GameError::InvalidLength { .. }
            | GameError::NotLetters
            | GameError::NotAWord => StatusCode::BAD_REQUEST,
            GameError::LockedLevel
            | GameError::AttemptsExhausted
            | GameError::BotFinished => StatusCode::FORBIDDEN,
            GameError::AlreadySolved => StatusCode::CONFLICT,
            GameError::Cooldown { .. } => StatusCode::TOO_MANY_REQUESTS,
            GameError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            GameError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Store details stay in the logs, not on the wire.
        let message = match &self.0 {
            GameError::Store(e) => {
                tracing::warn!(error = %e, "state store unavailable");
                "State store unavailable".to_owned()
            }
            GameError::Serialization(e) => {
                tracing::error!(error = %e, "serialization failure");
                "Internal error".to_owned()
            }
            other => other.to_string(),
        };

        let body = if let GameError::Cooldown { retry_after } = &self.0 {
            serde_json::json!({
                "error": message,
                "status": status.as_u16(),
                "retry_after": retry_after,
            })
        } else {
            serde_json::json!({
                "error": message,
                "status": status.as_u16(),
            })
        };

        let mut response = (status, axum::Json(body)).into_response();
        if let GameError::Cooldown { retry_after } = &self.0
            && let Ok(value) = HeaderValue::from_str(&retry_after.to_string())
        {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
        response
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wordsprint_store::StoreError;

    use super::*;

    #[test]
    fn status_mapping_keeps_classes_distinct() {
        let cases = [
            (GameError::InvalidLevel, StatusCode::BAD_REQUEST),
            (GameError::NotAWord, StatusCode::BAD_REQUEST),
            (GameError::LockedLevel, StatusCode::FORBIDDEN),
            (GameError::AttemptsExhausted, StatusCode::FORBIDDEN),
            (GameError::BotFinished, StatusCode::FORBIDDEN),
            (GameError::AlreadySolved, StatusCode::CONFLICT),
            (
                GameError::Cooldown { retry_after: 2 },
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                GameError::Store(StoreError::WrongType("wsp:p:x:att".to_owned())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError(err).status(), expected);
        }
    }

    #[test]
    fn cooldown_response_carries_retry_after_header() {
        let response = ApiError(GameError::Cooldown { retry_after: 2 }).into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(header::RETRY_AFTER).unwrap(),
            &HeaderValue::from_static("2")
        );
    }
}
