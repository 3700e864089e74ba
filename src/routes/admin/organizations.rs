use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::session::AdminSession;
use crate::models::organization::NewOrganization;
use crate::responses::JsonResponse;
use crate::routes::store_error_response;
use crate::state::AppState;

pub async fn create_organization(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(payload): Json<NewOrganization>,
) -> Response {
    match state.store.create_organization(payload).await {
        Ok(organization) => (StatusCode::CREATED, Json(organization)).into_response(),
        Err(err) => store_error_response("Failed to create organization", err),
    }
}

pub async fn update_organization(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<String>,
    Json(payload): Json<NewOrganization>,
) -> Response {
    match state.store.update_organization(&id, payload).await {
        Ok(Some(organization)) => Json(organization).into_response(),
        Ok(None) => JsonResponse::not_found("Organization not found").into_response(),
        Err(err) => store_error_response("Failed to update organization", err),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::db::mem_store::MemStore;
    use crate::db::store::Store;
    use crate::models::organization::NewOrganization;
    use crate::routes::api_router;
    use crate::routes::test_support::test_state;
    use crate::state::AppState;

    fn authed_post(state: &AppState, uri: &str, body: serde_json::Value) -> Request<Body> {
        let token = state.sessions.create();
        Request::post(uri)
            .header("Content-Type", "application/json")
            .header(header::COOKIE, format!("admin_session={token}"))
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn authed_put(state: &AppState, uri: &str, body: serde_json::Value) -> Request<Body> {
        let token = state.sessions.create();
        Request::put(uri)
            .header("Content-Type", "application/json")
            .header(header::COOKIE, format!("admin_session={token}"))
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn create_without_session_is_401_and_writes_nothing() {
        let store = Arc::new(MemStore::default());
        let app = api_router(test_state(store.clone()));

        let res = app
            .oneshot(
                Request::post("/api/admin/organizations")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"name":"KC Chorale"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(store.list_organizations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_with_session_persists_and_normalizes() {
        let store = Arc::new(MemStore::default());
        let state = test_state(store.clone());
        let app = api_router(state.clone());

        let res = app
            .oneshot(authed_post(
                &state,
                "/api/admin/organizations",
                serde_json::json!({ "name": "KC Chorale", "shortName": "" }),
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::CREATED);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["name"], "KC Chorale");
        assert!(json["shortName"].is_null());
        assert!(!json["id"].as_str().unwrap().is_empty());

        assert_eq!(store.list_organizations().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_with_blank_name_is_400() {
        let state = test_state(Arc::new(MemStore::default()));
        let app = api_router(state.clone());

        let res = app
            .oneshot(authed_post(
                &state,
                "/api/admin/organizations",
                serde_json::json!({ "name": "   " }),
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Organization name is required");
    }

    #[tokio::test]
    async fn update_replaces_record_in_place() {
        let store = Arc::new(MemStore::default());
        let org = store
            .create_organization(NewOrganization {
                name: "Old Name".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let state = test_state(store.clone());
        let app = api_router(state.clone());

        let res = app
            .oneshot(authed_put(
                &state,
                &format!("/api/admin/organizations/{}", org.id),
                serde_json::json!({ "name": "New Name" }),
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["id"], org.id);
        assert_eq!(json["name"], "New Name");
    }

    #[tokio::test]
    async fn update_unknown_id_is_404() {
        let state = test_state(Arc::new(MemStore::default()));
        let app = api_router(state.clone());

        let res = app
            .oneshot(authed_put(
                &state,
                "/api/admin/organizations/missing",
                serde_json::json!({ "name": "Whatever" }),
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
