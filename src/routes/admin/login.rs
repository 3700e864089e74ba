use axum::{
    extract::{Json, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::Duration as TimeDuration;
use uuid::Uuid;

use super::session::SESSION_COOKIE;
use crate::responses::JsonResponse;
use crate::state::AppState;

#[derive(Deserialize, Serialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub password: String,
}

pub async fn handle_login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Response {
    if payload.password.is_empty() {
        return JsonResponse::bad_request("Password is required").into_response();
    }

    if payload.password != state.config.admin_password {
        return JsonResponse::unauthorized("Invalid password").into_response();
    }

    let token = state.sessions.create();
    let cookie = Cookie::build((SESSION_COOKIE, token.to_string()))
        .http_only(true)
        .secure(false)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(TimeDuration::seconds(state.sessions.ttl().num_seconds()))
        .build();

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie.to_string()).unwrap(),
    );

    (
        StatusCode::OK,
        headers,
        JsonResponse::success("Login successful"),
    )
        .into_response()
}

pub async fn handle_logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(token) = session_token(&jar) {
        state.sessions.revoke(token);
    }

    let expired_cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::seconds(0))
        .build();

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&expired_cookie.to_string()).unwrap(),
    );

    (
        StatusCode::OK,
        headers,
        JsonResponse::success("Logout successful"),
    )
        .into_response()
}

pub async fn admin_status(State(state): State<AppState>, jar: CookieJar) -> Response {
    let is_authenticated = session_token(&jar)
        .map(|token| state.sessions.is_valid(token))
        .unwrap_or(false);

    axum::Json(json!({ "isAuthenticated": is_authenticated })).into_response()
}

fn session_token(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::db::mem_store::MemStore;
    use crate::routes::api_router;
    use crate::routes::test_support::{test_state, TEST_PASSWORD};

    fn login_request(password: &str) -> Request<Body> {
        Request::post("/api/admin/login")
            .header("Content-Type", "application/json")
            .body(Body::from(format!("{{\"password\":\"{password}\"}}")))
            .unwrap()
    }

    #[tokio::test]
    async fn login_success_sets_session_cookie() {
        let app = api_router(test_state(Arc::new(MemStore::default())));

        let res = app.oneshot(login_request(TEST_PASSWORD)).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let set_cookie = res.headers().get("set-cookie").unwrap().to_str().unwrap();
        assert!(set_cookie.contains("admin_session="));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Lax"));

        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Login successful");
    }

    #[tokio::test]
    async fn login_wrong_password_is_401() {
        let app = api_router(test_state(Arc::new(MemStore::default())));

        let res = app.oneshot(login_request("wrong")).await.unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Invalid password");
    }

    #[tokio::test]
    async fn login_missing_password_is_400() {
        let app = api_router(test_state(Arc::new(MemStore::default())));

        let res = app
            .oneshot(
                Request::post("/api/admin/login")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn status_reflects_session_cookie() {
        let state = test_state(Arc::new(MemStore::default()));
        let token = state.sessions.create();
        let app = api_router(state);

        let res = app
            .clone()
            .oneshot(
                Request::get("/api/admin/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["isAuthenticated"], false);

        let res = app
            .oneshot(
                Request::get("/api/admin/status")
                    .header(header::COOKIE, format!("admin_session={token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["isAuthenticated"], true);
    }

    #[tokio::test]
    async fn logout_revokes_session_and_expires_cookie() {
        let state = test_state(Arc::new(MemStore::default()));
        let token = state.sessions.create();
        let sessions = state.sessions.clone();
        let app = api_router(state);

        let res = app
            .oneshot(
                Request::post("/api/admin/logout")
                    .header(header::COOKIE, format!("admin_session={token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let set_cookie = res.headers().get("set-cookie").unwrap().to_str().unwrap();
        assert!(set_cookie.contains("admin_session="));
        assert!(set_cookie.contains("Max-Age=0"));
        assert!(!sessions.is_valid(token));
    }

    #[tokio::test]
    async fn logout_without_session_still_succeeds() {
        let app = api_router(test_state(Arc::new(MemStore::default())));

        let res = app
            .oneshot(
                Request::post("/api/admin/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Logout successful");
    }
}
