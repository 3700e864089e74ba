use axum::{
    extract::{Json, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::session::AdminSession;
use crate::db::store::StoreError;
use crate::models::ensemble::{Ensemble, NewEnsemble};
use crate::models::organization::{NewOrganization, Organization};
use crate::responses::JsonResponse;
use crate::routes::store_error_response;
use crate::state::AppState;

/// Combined admin submission: one organization plus its ensembles in a
/// single request. An id on a section means update, no id means create.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySubmission {
    pub organization: OrganizationSubmission,
    #[serde(default)]
    pub ensembles: Vec<EnsembleSubmission>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSubmission {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: NewOrganization,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnsembleSubmission {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: NewEnsemble,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReport {
    pub organization: Organization,
    pub ensembles: Vec<EnsembleOutcome>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum EnsembleOutcome {
    Created { ensemble: Ensemble },
    Updated { ensemble: Ensemble },
    Failed { name: String, message: String },
}

/// The organization is written first so every ensemble can reference its id.
/// Ensemble failures do not roll anything back; they are reported per entry
/// so the caller can resubmit only what failed. An organization-level
/// failure aborts before any ensemble is touched.
pub async fn submit_directory(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(payload): Json<DirectorySubmission>,
) -> Response {
    let organization = match payload.organization.id {
        Some(id) => match state
            .store
            .update_organization(&id, payload.organization.fields)
            .await
        {
            Ok(Some(organization)) => organization,
            Ok(None) => return JsonResponse::not_found("Organization not found").into_response(),
            Err(err) => return store_error_response("Failed to update organization", err),
        },
        None => match state
            .store
            .create_organization(payload.organization.fields)
            .await
        {
            Ok(organization) => organization,
            Err(err) => return store_error_response("Failed to create organization", err),
        },
    };

    let mut outcomes = Vec::with_capacity(payload.ensembles.len());
    for submission in payload.ensembles {
        let mut fields = submission.fields;
        fields.organization_id = organization.id.clone();
        let label = fields.name.clone();

        let outcome = match submission.id {
            Some(id) => match state.store.update_ensemble(&id, fields).await {
                Ok(Some(ensemble)) => EnsembleOutcome::Updated { ensemble },
                Ok(None) => EnsembleOutcome::Failed {
                    name: label,
                    message: "Ensemble not found".to_string(),
                },
                Err(err) => EnsembleOutcome::Failed {
                    name: label,
                    message: submission_error_message(err),
                },
            },
            None => match state.store.create_ensemble(fields).await {
                Ok(ensemble) => EnsembleOutcome::Created { ensemble },
                Err(err) => EnsembleOutcome::Failed {
                    name: label,
                    message: submission_error_message(err),
                },
            },
        };
        outcomes.push(outcome);
    }

    Json(SubmissionReport {
        organization,
        ensembles: outcomes,
    })
    .into_response()
}

fn submission_error_message(err: StoreError) -> String {
    match err {
        StoreError::Validation(message) | StoreError::InvalidArgument(message) => message,
        StoreError::UnknownOrganization(_) => "Organization not found".to_string(),
        err @ (StoreError::Read(_) | StoreError::Parse(_) | StoreError::Write(_)) => {
            tracing::error!("Failed to save ensemble: {err:?}");
            "Failed to save ensemble".to_string()
        }
    }
}
