use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::SignedCookieJar;
use uuid::Uuid;

use crate::{
    error::AppError,
    session::{AdminSession, SESSION_COOKIE, SessionStore},
    state::AppState,
};

pub const LOGIN_PATH: &str = "/admin/login";

/// Resolves the admin behind the request's session cookie.
pub fn current_admin(
    sessions: &SessionStore,
    jar: &SignedCookieJar,
) -> Result<AdminSession, AppError> {
    let id = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
        .ok_or(AppError::Unauthorized)?;

    match sessions.get(&id) {
        Some(session) if session.admin_id > 0 && !session.username.is_empty() => Ok(session),
        _ => Err(AppError::Unauthorized),
    }
}

/// Guards the admin pages: requests without a live admin session are sent
/// to the login page.
pub async fn require_admin(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match current_admin(&state.sessions, &jar) {
        Ok(admin) => {
            request.extensions_mut().insert(admin);
            next.run(request).await
        }
        Err(_) => {
            tracing::debug!(uri = %request.uri(), "admin session missing, redirecting to login");
            Redirect::to(LOGIN_PATH).into_response()
        }
    }
}

/// The admin stored by [`require_admin`]; only usable behind that layer.
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub AdminSession);

impl<S> FromRequestParts<S> for CurrentAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminSession>()
            .cloned()
            .map(CurrentAdmin)
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{session_cookie, signing_key};

    fn jar_with(value: Option<Uuid>) -> SignedCookieJar {
        let jar = SignedCookieJar::new(signing_key("test-secret"));
        match value {
            Some(id) => jar.add(session_cookie(id)),
            None => jar,
        }
    }

    #[test]
    fn allows_live_admin_session() {
        let sessions = SessionStore::new();
        let id = sessions.create(1, "admin");
        let admin = current_admin(&sessions, &jar_with(Some(id))).expect("allowed");
        assert_eq!(admin.admin_id, 1);
    }

    #[test]
    fn denies_missing_or_unknown_session() {
        let sessions = SessionStore::new();
        sessions.create(1, "admin");
        assert!(matches!(
            current_admin(&sessions, &jar_with(None)),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            current_admin(&sessions, &jar_with(Some(Uuid::new_v4()))),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn denies_destroyed_session() {
        let sessions = SessionStore::new();
        let id = sessions.create(1, "admin");
        sessions.destroy(&id);
        assert!(current_admin(&sessions, &jar_with(Some(id))).is_err());
    }
}
