//! Per-browser session context: the last profile submitted and the advice it produced.
//!
//! Sessions live only in process memory and are keyed by a cookie. Nothing is
//! persisted; idle sessions are dropped after `SESSION_IDLE_LIMIT_HOURS`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Duration, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::models::FitnessProfile;

pub const SESSION_COOKIE: &str = "trainer_session";
const SESSION_IDLE_LIMIT_HOURS: i64 = 24;

#[derive(Debug, Clone)]
pub struct SessionContext {
    pub profile: Option<FitnessProfile>,
    /// Overwritten by each new request; cleared once exported.
    pub advice: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl SessionContext {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            profile: None,
            advice: None,
            created_at: now,
            last_seen: now,
        }
    }
}

/// Advice taken out of a session for export, with the profile it was generated for.
#[derive(Debug, Clone)]
pub struct ExportableAdvice {
    pub advice: String,
    pub profile: Option<FitnessProfile>,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionContext>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<Uuid, SessionContext>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Uuid, SessionContext>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Opens a fresh, empty session.
    pub fn start(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.write().insert(id, SessionContext::new(Utc::now()));
        debug!(session = %id, "Session started");
        id
    }

    /// Returns the caller's live session id, starting a new session when the
    /// cookie is missing, unknown or expired. The flag is `true` for new sessions.
    pub fn resolve(&self, presented: Option<Uuid>) -> (Uuid, bool) {
        let now = Utc::now();
        self.purge_expired(now);

        if let Some(id) = presented {
            if let Some(ctx) = self.write().get_mut(&id) {
                ctx.last_seen = now;
                return (id, false);
            }
        }
        let id = self.start();
        debug!(active_sessions = self.len(), "Session count");
        (id, true)
    }

    pub fn get(&self, id: Uuid) -> Option<SessionContext> {
        self.read().get(&id).cloned()
    }

    /// Replaces whatever advice the session held.
    pub fn store_advice(&self, id: Uuid, profile: Option<FitnessProfile>, advice: String) {
        let now = Utc::now();
        let mut sessions = self.write();
        let ctx = sessions.entry(id).or_insert_with(|| SessionContext::new(now));
        ctx.profile = profile;
        ctx.advice = Some(advice);
        ctx.last_seen = now;
    }

    /// Removes the advice from the session and hands it to the exporter.
    /// The profile is kept so the form stays filled in.
    pub fn take_advice(&self, id: Uuid) -> Option<ExportableAdvice> {
        let mut sessions = self.write();
        let ctx = sessions.get_mut(&id)?;
        let advice = ctx.advice.take()?;
        ctx.last_seen = Utc::now();
        Some(ExportableAdvice {
            advice,
            profile: ctx.profile.clone(),
        })
    }

    pub fn clear(&self, id: Uuid) {
        if let Some(ctx) = self.write().remove(&id) {
            let age_secs = (Utc::now() - ctx.created_at).num_seconds();
            debug!(session = %id, age_secs, "Session cleared");
        }
    }

    /// Drops sessions idle for longer than the limit. Returns how many were removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let limit = Duration::hours(SESSION_IDLE_LIMIT_HOURS);
        let mut sessions = self.write();
        let before = sessions.len();
        sessions.retain(|_, ctx| now - ctx.last_seen <= limit);
        let removed = before - sessions.len();
        if removed > 0 {
            debug!(removed, "Purged idle sessions");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }
}

/// Reads the session id from the request's `Cookie` header(s).
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// `Set-Cookie` value for a session id.
pub fn session_cookie(id: Uuid) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_resolve_without_cookie_starts_session() {
        let store = SessionStore::new();
        let (id, is_new) = store.resolve(None);
        assert!(is_new);
        let ctx = store.get(id).unwrap();
        assert!(ctx.advice.is_none());
        assert!(ctx.profile.is_none());
    }

    #[test]
    fn test_resolve_known_cookie_reuses_session() {
        let store = SessionStore::new();
        let id = store.start();
        assert_eq!(store.resolve(Some(id)), (id, false));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_resolve_unknown_cookie_starts_fresh() {
        let store = SessionStore::new();
        let stale = Uuid::new_v4();
        let (id, is_new) = store.resolve(Some(stale));
        assert!(is_new);
        assert_ne!(id, stale);
    }

    #[test]
    fn test_new_advice_overwrites_old() {
        let store = SessionStore::new();
        let id = store.start();
        store.store_advice(id, None, "first".to_string());
        store.store_advice(id, Some(FitnessProfile::default()), "second".to_string());
        let ctx = store.get(id).unwrap();
        assert_eq!(ctx.advice.as_deref(), Some("second"));
        assert!(ctx.profile.is_some());
    }

    #[test]
    fn test_take_advice_clears_it() {
        let store = SessionStore::new();
        let id = store.start();
        store.store_advice(id, Some(FitnessProfile::default()), "plan".to_string());

        let taken = store.take_advice(id).unwrap();
        assert_eq!(taken.advice, "plan");
        assert!(taken.profile.is_some());
        assert!(store.take_advice(id).is_none());
        assert!(store.get(id).unwrap().profile.is_some());
    }

    #[test]
    fn test_sessions_are_independent() {
        let store = SessionStore::new();
        let a = store.start();
        let b = store.start();
        store.store_advice(a, None, "for a".to_string());
        assert!(store.get(b).unwrap().advice.is_none());
    }

    #[test]
    fn test_purge_expired_drops_idle_sessions() {
        let store = SessionStore::new();
        let id = store.start();
        let later = Utc::now() + Duration::hours(SESSION_IDLE_LIMIT_HOURS + 1);
        assert_eq!(store.purge_expired(later), 1);
        assert!(store.get(id).is_none());
    }

    #[test]
    fn test_clear_removes_session() {
        let store = SessionStore::new();
        let id = store.start();
        store.clear(id);
        assert!(store.get(id).is_none());
    }

    #[test]
    fn test_cookie_parsing_finds_session_among_others() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {SESSION_COOKIE}={id}; lang=en")).unwrap(),
        );
        assert_eq!(session_id_from_headers(&headers), Some(id));
    }

    #[test]
    fn test_cookie_parsing_ignores_garbage() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("trainer_session=not-a-uuid"),
        );
        assert_eq!(session_id_from_headers(&headers), None);
        assert_eq!(session_id_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_session_cookie_round_trips_through_parser() {
        let id = Uuid::new_v4();
        let cookie = session_cookie(id);
        let mut headers = HeaderMap::new();
        let pair = cookie.split(';').next().unwrap();
        headers.insert(header::COOKIE, HeaderValue::from_str(pair).unwrap());
        assert_eq!(session_id_from_headers(&headers), Some(id));
        assert!(cookie.contains("HttpOnly"));
    }
}
