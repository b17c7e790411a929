use axum::http::{header, HeaderMap, HeaderValue};
use cookie::{Cookie, SameSite};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const SESSION_COOKIE: &str = "session_id";

/// Per-browser state.
///
/// Starts with `is_admin = false`; only a successful credential check flips
/// it, and nothing flips it back. A new session is the only way out of admin
/// mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    pub is_admin: bool,
}

/// A resolved session for the current request.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// `None` for anonymous requests; only admin sessions carry an id.
    pub id: Option<String>,
    pub state: SessionState,
    /// Set when the session was just created and the cookie must be sent.
    pub set_cookie: Option<HeaderValue>,
}

impl Session {
    /// Headers to attach to the response.
    pub fn response_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &self.set_cookie {
            headers.insert(header::SET_COOKIE, cookie.clone());
        }
        headers
    }
}

/// In-memory table of admin sessions keyed by cookie value.
///
/// Normal mode is the absence of an entry, so anonymous traffic never
/// allocates anything here.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionState>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the request's session. Unknown or missing cookies resolve to
    /// an anonymous normal-mode session without touching the table.
    pub async fn resolve(&self, headers: &HeaderMap) -> Session {
        let Some(id) = cookie_value(headers, SESSION_COOKIE) else {
            return Session::default();
        };

        match self.sessions.read().await.get(&id).copied() {
            Some(state) => Session {
                id: Some(id),
                state,
                set_cookie: None,
            },
            None => Session::default(),
        }
    }

    /// Mint a fresh admin session and the cookie that carries it.
    pub async fn grant_admin(&self) -> Session {
        let id = uuid::Uuid::new_v4().to_string();
        let state = SessionState { is_admin: true };
        self.sessions.write().await.insert(id.clone(), state);
        tracing::debug!(session = %id, "Admin session started");

        let cookie = Cookie::build((SESSION_COOKIE, id.clone()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();

        Session {
            id: Some(id),
            state,
            set_cookie: HeaderValue::from_str(&cookie.to_string()).ok(),
        }
    }

    pub async fn get(&self, id: &str) -> Option<SessionState> {
        self.sessions.read().await.get(id).copied()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// First value for `name` across the `Cookie` header(s). Malformed pairs are
/// skipped.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|c| c.name() == name)
        .map(|c| c.value_trimmed().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie_headers(raw: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(raw).unwrap());
        headers
    }

    #[test]
    fn test_cookie_value_parsing() {
        let headers = cookie_headers("theme=dark; session_id=abc-123; other=x");
        assert_eq!(cookie_value(&headers, "session_id").as_deref(), Some("abc-123"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_cookie_value_quoted_and_duplicate() {
        let headers = cookie_headers("session_id=\"abc\"; session_id=def");
        assert_eq!(cookie_value(&headers, "session_id").as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_anonymous_requests_store_nothing() {
        let store = SessionStore::new();
        for _ in 0..100 {
            let session = store.resolve(&HeaderMap::new()).await;
            assert!(!session.state.is_admin);
            assert!(session.id.is_none());
            assert!(session.set_cookie.is_none());
        }
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_forged_cookie_is_normal_mode_and_not_stored() {
        let store = SessionStore::new();
        for i in 0..100 {
            let headers = cookie_headers(&format!("session_id=forged-{}", i));
            let session = store.resolve(&headers).await;
            assert!(!session.state.is_admin);
            assert!(session.id.is_none());
        }
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_grant_admin_sets_cookie_and_resolves() {
        let store = SessionStore::new();
        let admin = store.grant_admin().await;
        let id = admin.id.clone().unwrap();
        assert_eq!(store.len().await, 1);

        let raw = admin.set_cookie.unwrap();
        let parsed = Cookie::parse(raw.to_str().unwrap().to_string()).unwrap();
        assert_eq!(parsed.name(), SESSION_COOKIE);
        assert_eq!(parsed.value(), id);
        assert_eq!(parsed.path(), Some("/"));
        assert_eq!(parsed.http_only(), Some(true));
        assert_eq!(parsed.same_site(), Some(SameSite::Lax));

        let headers = cookie_headers(&format!("session_id={}", id));
        let resolved = store.resolve(&headers).await;
        assert_eq!(resolved.id.as_deref(), Some(id.as_str()));
        assert!(resolved.state.is_admin);
        assert!(resolved.set_cookie.is_none());
        assert_eq!(store.get(&id).await, Some(SessionState { is_admin: true }));
    }
}
