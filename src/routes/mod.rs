pub mod admin;
pub mod directory;
pub mod ensembles;
pub mod organizations;

use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::Router;

use crate::db::store::StoreError;
use crate::responses::JsonResponse;
use crate::state::AppState;

/// Full API surface under `/api`. Layers (trace, CORS) are applied by the
/// caller.
pub fn api_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/login", post(admin::handle_login))
        .route("/logout", post(admin::handle_logout))
        .route("/status", get(admin::admin_status))
        .route("/organizations", post(admin::create_organization))
        .route("/organizations/{id}", put(admin::update_organization))
        .route("/ensembles", post(admin::create_ensemble))
        .route("/ensembles/{id}", put(admin::update_ensemble))
        .route("/submissions", post(admin::submit_directory));

    let public_routes = Router::new()
        .route("/organizations", get(organizations::list_organizations))
        .route("/organizations/{id}", get(organizations::get_organization))
        .route(
            "/organizations/{id}/ensembles",
            get(organizations::list_organization_ensembles),
        )
        .route("/orgs/{slug}", get(organizations::get_organization_by_slug))
        .route("/ensembles", get(ensembles::list_ensembles))
        .route("/directory", get(directory::get_directory));

    let api = public_routes.nest("/admin", admin_routes);

    Router::new().nest("/api", api).with_state(state)
}


/// Maps store failures to responses: validation and referential problems are
/// the caller's fault and carry their message; storage failures are logged
/// and reported as the generic `context` message only.
pub(crate) fn store_error_response(context: &str, err: StoreError) -> Response {
    match err {
        StoreError::Validation(message) | StoreError::InvalidArgument(message) => {
            JsonResponse::bad_request(&message).into_response()
        }
        StoreError::UnknownOrganization(_) => {
            JsonResponse::bad_request("Organization not found").into_response()
        }
        err @ (StoreError::Read(_) | StoreError::Parse(_) | StoreError::Write(_)) => {
            tracing::error!("{context}: {err:?}");
            JsonResponse::server_error(context).into_response()
        }
    }
}
