//! Server-side admin sessions.
//!
//! The browser only holds a signed `sid` cookie naming a random session id;
//! the admin identity lives in the in-process [`SessionStore`].

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, Key, SameSite};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use sha2::{Digest, Sha512};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "sid";

/// Sessions older than this are dropped, whether or not the admin logged out.
pub const SESSION_MAX_AGE_HOURS: i64 = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct AdminSession {
    pub admin_id: i32,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<DashMap<Uuid, AdminSession>>,
    max_age: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_max_age(Duration::hours(SESSION_MAX_AGE_HOURS))
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_age(max_age: Duration) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            max_age,
        }
    }

    fn is_expired(&self, session: &AdminSession, now: DateTime<Utc>) -> bool {
        now - session.created_at >= self.max_age
    }

    /// Starts a session for `admin_id` and returns its id. Expired sessions
    /// are pruned first.
    pub fn create(&self, admin_id: i32, username: &str) -> Uuid {
        let now = Utc::now();
        self.inner.retain(|_, session| !self.is_expired(session, now));

        let id = Uuid::new_v4();
        self.inner.insert(
            id,
            AdminSession {
                admin_id,
                username: username.to_string(),
                created_at: now,
            },
        );
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<AdminSession> {
        let now = Utc::now();
        if self
            .inner
            .remove_if(id, |_, session| self.is_expired(session, now))
            .is_some()
        {
            tracing::debug!(session_id = %id, "admin session expired");
            return None;
        }
        self.inner.get(id).map(|entry| entry.value().clone())
    }

    pub fn destroy(&self, id: &Uuid) -> Option<AdminSession> {
        self.inner.remove(id).map(|(_, session)| session)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Cookie signing key derived from the configured session secret.
pub fn signing_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

pub fn session_cookie(id: Uuid) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie used to clear `sid` in the browser.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}
