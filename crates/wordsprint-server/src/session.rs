//! Session identity: sid cookie plus network-address fallback.
//!
//! Every response is given a `sid` cookie (random UUID hex, `HttpOnly`,
//! `SameSite=Lax`) if the request carried none. The core treats the sid as
//! an opaque string; a request without one is identified by its network
//! address alone, so the very first request of a fresh browser still plays
//! as a (address-keyed) player.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts, Request};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

/// Name of the session cookie.
const SID_COOKIE: &str = "sid";

/// Identity placeholder when no peer address is available (e.g. in-process
/// router tests driven without a socket).
const UNKNOWN_ADDR: &str = "unknown";

/// Who is making this request, as far as the game cares.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Session id from the `sid` cookie, if the browser presented one.
    pub session: Option<String>,
    /// Peer network address (IP without port), `"unknown"` when absent.
    pub addr: String,
}

impl Identity {
    /// The opaque player key: the session id when present, else the
    /// network address.
    pub fn player(&self) -> &str {
        self.session.as_deref().unwrap_or(&self.addr)
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = cookie_value(&parts.headers, SID_COOKIE);
        let addr = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map_or_else(|| UNKNOWN_ADDR.to_owned(), |ci| ci.0.ip().to_string());
        Ok(Self { session, addr })
    }
}

/// Middleware ensuring every browser leaves with a `sid` cookie.
///
/// The cookie is only *set* here; the current request is still handled
/// under whatever identity it arrived with (address fallback on the first
/// visit). The new sid takes effect from the browser's next request.
pub async fn ensure_sid_cookie(request: Request, next: Next) -> Response {
    let has_sid = cookie_value(request.headers(), SID_COOKIE).is_some();
    let mut response = next.run(request).await;

    if !has_sid {
        let sid = Uuid::new_v4().simple().to_string();
        let cookie = format!("{SID_COOKIE}={sid}; HttpOnly; SameSite=Lax; Path=/");
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}

/// Extract a cookie's value from the `Cookie` header(s), if present.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            (k.trim() == name).then(|| v.trim().to_owned())
        })
        .find(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_sid_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; sid=abc123; lang=en");
        assert_eq!(cookie_value(&headers, "sid"), Some("abc123".to_owned()));
    }

    #[test]
    fn missing_or_empty_sid_is_none() {
        let headers = headers_with_cookie("theme=dark");
        assert_eq!(cookie_value(&headers, "sid"), None);
        let headers = headers_with_cookie("sid=");
        assert_eq!(cookie_value(&headers, "sid"), None);
    }

    #[test]
    fn player_prefers_session_over_address() {
        let id = Identity {
            session: Some("s".to_owned()),
            addr: "1.2.3.4".to_owned(),
        };
        assert_eq!(id.player(), "s");

        let id = Identity {
            session: None,
            addr: "1.2.3.4".to_owned(),
        };
        assert_eq!(id.player(), "1.2.3.4");
    }
}
