use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::responses::JsonResponse;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "admin_session";

/// Extractor guarding the admin mutation routes: the session cookie must
/// hold a live token from the session store. Carries the token so logout
/// flows can revoke it.
#[derive(Debug)]
pub struct AdminSession(pub Uuid);

impl<S> FromRequestParts<S> for AdminSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
            .ok_or_else(unauthorized)?;

        if app_state.sessions.is_valid(token) {
            Ok(AdminSession(token))
        } else {
            Err(unauthorized())
        }
    }
}

fn unauthorized() -> Response {
    JsonResponse::unauthorized("Authentication required").into_response()
}
