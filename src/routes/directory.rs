use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};

use crate::directory::{build_directory, DirectoryFilter};
use crate::routes::store_error_response;
use crate::state::AppState;

/// Server-side rendition of the directory page's filter engine: the client
/// replays its search box and facet selections as query parameters and gets
/// back the filtered, sorted, display-ready entries.
pub async fn get_directory(
    State(state): State<AppState>,
    Query(filter): Query<DirectoryFilter>,
) -> Response {
    let organizations = match state.store.list_organizations().await {
        Ok(organizations) => organizations,
        Err(err) => return store_error_response("Failed to fetch organizations", err),
    };
    let ensembles = match state.store.list_ensembles().await {
        Ok(ensembles) => ensembles,
        Err(err) => return store_error_response("Failed to fetch ensembles", err),
    };

    Json(build_directory(&organizations, &ensembles, &filter)).into_response()
}
