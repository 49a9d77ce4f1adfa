use axum::{
    Form, Router,
    extract::{State, rejection::FormRejection},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::SignedCookieJar;
use uuid::Uuid;

use crate::{
    dto::auth::{LoginForm, LoginPage},
    middleware::auth::LOGIN_PATH,
    response::{ApiResponse, Page, page, page_error_with},
    routes::form_fields,
    services::auth_service::{login_admin, logout_admin},
    session::{SESSION_COOKIE, removal_cookie, session_cookie},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout).post(logout))
}

#[utoipa::path(
    get,
    path = "/admin/login",
    responses(
        (status = 200, description = "Admin login page", body = ApiResponse<LoginPage>)
    ),
    tag = "Auth"
)]
pub async fn login_page() -> Page<LoginPage> {
    page("Admin login", LoginPage::default())
}

#[utoipa::path(
    post,
    path = "/admin/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in, redirect to /admin/orders"),
        (status = 200, description = "Login page re-rendered with an error", body = ApiResponse<LoginPage>)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Response {
    let form = form_fields(form);
    let username = form
        .as_ref()
        .ok()
        .map(|form| form.username.trim().to_string());
    let logged_in = match form {
        Ok(form) => login_admin(&state, form).await,
        Err(err) => Err(err),
    };
    match logged_in {
        Ok(session_id) => (
            jar.add(session_cookie(session_id)),
            Redirect::to("/admin/orders"),
        )
            .into_response(),
        Err(err) => page_error_with(
            "Login error",
            err,
            LoginPage { username },
        )
        .into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/admin/logout",
    responses(
        (status = 303, description = "Session destroyed, redirect to /admin/login")
    ),
    tag = "Auth"
)]
pub async fn logout(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    if let Some(id) = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
    {
        logout_admin(&state, &id);
    }
    (jar.remove(removal_cookie()), Redirect::to(LOGIN_PATH)).into_response()
}
