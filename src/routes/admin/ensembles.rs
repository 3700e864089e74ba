use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::session::AdminSession;
use crate::models::ensemble::NewEnsemble;
use crate::responses::JsonResponse;
use crate::routes::store_error_response;
use crate::state::AppState;

pub async fn create_ensemble(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(payload): Json<NewEnsemble>,
) -> Response {
    match state.store.create_ensemble(payload).await {
        Ok(ensemble) => (StatusCode::CREATED, Json(ensemble)).into_response(),
        Err(err) => store_error_response("Failed to create ensemble", err),
    }
}

pub async fn update_ensemble(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<String>,
    Json(payload): Json<NewEnsemble>,
) -> Response {
    match state.store.update_ensemble(&id, payload).await {
        Ok(Some(ensemble)) => Json(ensemble).into_response(),
        Ok(None) => JsonResponse::not_found("Ensemble not found").into_response(),
        Err(err) => store_error_response("Failed to update ensemble", err),
    }
}
