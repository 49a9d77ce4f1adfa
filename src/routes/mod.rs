use axum::{
    Form, Router,
    extract::rejection::FormRejection,
    middleware,
    routing::get,
};

use crate::{
    error::{AppError, AppResult},
    middleware::auth::require_admin,
    state::AppState,
};

pub mod admin;
pub mod auth;
pub mod doc;
pub mod health;
pub mod menu;
pub mod orders;

// Build the page router without binding state; it will be provided at the top level.
pub fn create_router(state: &AppState) -> Router<AppState> {
    // Every path under `/admin` is guarded, unknown ones included.
    // Login and logout are merged in outside the layer.
    let guarded = admin::router()
        .fallback(admin_not_found)
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(menu::router())
        .merge(orders::router())
        .nest("/admin", auth::router().merge(guarded))
}

async fn admin_not_found() -> AppError {
    AppError::NotFound
}

/// The parsed form, or a validation error when the body could not be read.
pub(crate) fn form_fields<T>(form: Result<Form<T>, FormRejection>) -> AppResult<T> {
    form.map(|Form(fields)| fields).map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entity::categories,
        session::session_cookie,
        state::testing::{empty_state, mock_state},
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
        response::IntoResponse,
    };
    use axum_extra::extract::SignedCookieJar;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use tower::ServiceExt;

    fn app(state: AppState) -> Router {
        create_router(&state).with_state(state)
    }

    /// A `Cookie` header value carrying a signed session id.
    fn signed_session(state: &AppState) -> String {
        let id = state.sessions.create(1, "admin");
        let jar = SignedCookieJar::new(state.cookie_key.clone()).add(session_cookie(id));
        let response = jar.into_response();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .expect("set-cookie header");
        set_cookie.split(';').next().unwrap().to_string()
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn guarded_pages_redirect_without_session() {
        let cases = [
            ("GET", "/admin/addItem"),
            ("POST", "/admin/addItem"),
            ("POST", "/admin/deleteItem"),
            ("GET", "/admin/categories"),
            ("POST", "/admin/addCategory"),
            ("POST", "/admin/deleteCategory"),
            ("GET", "/admin/orders"),
        ];
        for (method, uri) in cases {
            let request = Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::empty())
                .unwrap();
            let response = app(empty_state()).oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{method} {uri}");
            assert_eq!(
                response.headers().get(header::LOCATION).unwrap(),
                "/admin/login",
                "{method} {uri}"
            );
        }
    }

    #[tokio::test]
    async fn whole_admin_prefix_is_guarded() {
        let cases = [
            ("GET", "/admin/unknown"),
            ("POST", "/admin/unknown/deeper"),
            ("GET", "/admin/deleteItem"),
            ("DELETE", "/admin/categories"),
        ];
        for (method, uri) in cases {
            let request = Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap();
            let response = app(empty_state()).oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{method} {uri}");
            assert_eq!(
                response.headers().get(header::LOCATION).unwrap(),
                "/admin/login",
                "{method} {uri}"
            );
        }
    }

    #[tokio::test]
    async fn unknown_admin_path_with_session_is_not_found() {
        let state = empty_state();
        let cookie = signed_session(&state);
        let request = Request::builder()
            .uri("/admin/unknown")
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap();

        let response = app(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn forged_session_cookie_is_redirected() {
        let state = empty_state();
        state.sessions.create(1, "admin");
        let request = Request::builder()
            .uri("/admin/orders")
            .header(header::COOKIE, format!("sid={}", uuid::Uuid::new_v4()))
            .body(Body::empty())
            .unwrap();

        let response = app(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn admin_session_reaches_the_page() {
        let state = mock_state(MockDatabase::new(DatabaseBackend::Postgres).append_query_results(
            [vec![categories::Model {
                category_id: 1,
                category_name: "BBQ".into(),
            }]],
        ));
        let cookie = signed_session(&state);

        let request = Request::builder()
            .uri("/admin/categories")
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap();
        let response = app(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["message"], "Categories");
        assert_eq!(body["data"]["categories"][0]["category_name"], "BBQ");
    }

    #[tokio::test]
    async fn login_and_logout_pages_are_public() {
        let response = app(empty_state())
            .oneshot(Request::builder().uri("/admin/login").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let state = empty_state();
        let cookie = signed_session(&state);
        let sessions = state.sessions.clone();
        let response = app(state)
            .oneshot(
                Request::builder()
                    .uri("/admin/logout")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/admin/login");
        assert!(sessions.is_empty());
    }

    #[tokio::test]
    async fn invalid_phone_rerenders_order_form() {
        let response = app(empty_state())
            .oneshot(form_post(
                "/order/submit",
                "name=Ali&phone_number=3001234567&item_id=1&quantity=2",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["message"], "Invalid Pakistani phone number");
        assert_eq!(body["data"]["item_id"], 1);
    }

    #[tokio::test]
    async fn malformed_quantity_is_a_validation_message() {
        let response = app(empty_state())
            .oneshot(form_post(
                "/order/submit",
                "name=Ali&phone_number=03001234567&item_id=1&quantity=zero",
            ))
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["message"], "quantity must be between 1 and 9999");
    }

    #[tokio::test]
    async fn logout_accepts_post() {
        let response = app(empty_state())
            .oneshot(form_post("/admin/logout", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/admin/login");
    }

    #[tokio::test]
    async fn unreadable_order_form_rerenders_with_message() {
        let request = Request::builder()
            .method("POST")
            .uri("/order/submit")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Ali"}"#))
            .unwrap();

        let response = app(empty_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["message"], "Invalid form submission");
        assert!(body["data"]["item_id"].is_null());
    }

    #[tokio::test]
    async fn unreadable_admin_form_rerenders_with_message() {
        let state = empty_state();
        let cookie = signed_session(&state);
        let request = Request::builder()
            .method("POST")
            .uri("/admin/addCategory")
            .header(header::COOKIE, cookie)
            .body(Body::from("category_name=Drinks"))
            .unwrap();

        let response = app(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["message"], "Invalid form submission");
    }

    #[tokio::test]
    async fn success_page_renders() {
        let response = app(empty_state())
            .oneshot(Request::builder().uri("/success").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
