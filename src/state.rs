use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::{
    db::{DbPool, OrmConn},
    session::{SessionStore, signing_key},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: Arc<OrmConn>,
    pub sessions: SessionStore,
    pub cookie_key: Key,
}

impl AppState {
    pub fn new(pool: DbPool, orm: OrmConn, session_secret: &str) -> Self {
        Self {
            pool,
            orm: Arc::new(orm),
            sessions: SessionStore::new(),
            cookie_key: signing_key(session_secret),
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
