use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};

use crate::responses::JsonResponse;
use crate::routes::store_error_response;
use crate::state::AppState;

pub async fn list_organizations(State(state): State<AppState>) -> Response {
    match state.store.list_organizations().await {
        Ok(organizations) => Json(organizations).into_response(),
        Err(err) => store_error_response("Failed to fetch organizations", err),
    }
}

pub async fn get_organization(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.store.get_organization(&id).await {
        Ok(Some(organization)) => Json(organization).into_response(),
        Ok(None) => JsonResponse::not_found("Organization not found").into_response(),
        Err(err) => store_error_response("Failed to fetch organization", err),
    }
}

pub async fn get_organization_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    match state.store.get_organization_by_slug(&slug).await {
        Ok(Some(organization)) => Json(organization).into_response(),
        Ok(None) => JsonResponse::not_found("Organization not found").into_response(),
        Err(err) => store_error_response("Failed to fetch organization", err),
    }
}

pub async fn list_organization_ensembles(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.store.list_ensembles_by_organization(&id).await {
        Ok(ensembles) => Json(ensembles).into_response(),
        Err(err) => store_error_response("Failed to fetch ensembles", err),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::db::mem_store::MemStore;
    use crate::db::store::Store;
    use crate::models::organization::NewOrganization;
    use crate::routes::api_router;
    use crate::routes::test_support::test_state;

    #[tokio::test]
    async fn list_organizations_returns_full_collection() {
        let store = MemStore::default();
        store
            .create_organization(NewOrganization {
                name: "KC Chorale".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let app = api_router(test_state(Arc::new(store)));

        let res = app
            .oneshot(
                Request::get("/api/organizations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["name"], "KC Chorale");
        assert!(json[0]["shortName"].is_null());
    }

    #[tokio::test]
    async fn get_organization_joins_ensembles() {
        let store = MemStore::default();
        let org = store
            .create_organization(NewOrganization {
                name: "KC Chorale".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        store
            .create_ensemble(crate::models::ensemble::NewEnsemble {
                name: "Chamber Choir".to_string(),
                organization_id: org.id.clone(),
                ..Default::default()
            })
            .await
            .unwrap();
        let app = api_router(test_state(Arc::new(store)));

        let res = app
            .oneshot(
                Request::get(format!("/api/organizations/{}", org.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["name"], "KC Chorale");
        assert_eq!(json["ensembles"][0]["name"], "Chamber Choir");
        assert_eq!(json["ensembles"][0]["organizationName"], "KC Chorale");
    }

    #[tokio::test]
    async fn unknown_organization_is_404() {
        let app = api_router(test_state(Arc::new(MemStore::default())));

        let res = app
            .oneshot(
                Request::get("/api/organizations/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn slug_route_resolves_or_404s() {
        let store = MemStore::default();
        store
            .create_organization(NewOrganization {
                name: "KC Chorale".to_string(),
                url_slug: Some("kc-chorale".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        let app = api_router(test_state(Arc::new(store)));

        let res = app
            .clone()
            .oneshot(
                Request::get("/api/orgs/kc-chorale")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app
            .oneshot(Request::get("/api/orgs/unknown").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn storage_failure_is_a_generic_500() {
        let app = api_router(test_state(Arc::new(MemStore::failing())));

        let res = app
            .oneshot(
                Request::get("/api/organizations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Failed to fetch organizations");
    }
}
