use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};

use crate::routes::store_error_response;
use crate::state::AppState;

pub async fn list_ensembles(State(state): State<AppState>) -> Response {
    match state.store.list_ensembles().await {
        Ok(ensembles) => Json(ensembles).into_response(),
        Err(err) => store_error_response("Failed to fetch ensembles", err),
    }
}
