use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::ensemble::{Ensemble, NewEnsemble};
use crate::models::organization::{NewOrganization, Organization, OrganizationWithEnsembles};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("organization {0} does not exist")]
    UnknownOrganization(String),
    #[error("failed to read data file")]
    Read(#[source] std::io::Error),
    #[error("data file is not valid JSON")]
    Parse(#[source] serde_json::Error),
    #[error("failed to write data file")]
    Write(#[source] std::io::Error),
}

/// Storage backend for the two directory collections. Implementations must
/// assign ids at creation time, normalize empty optional fields to null, and
/// enforce the single referential constraint (ensemble -> organization).
#[async_trait]
pub trait Store: Send + Sync {
    async fn list_organizations(&self) -> Result<Vec<Organization>, StoreError>;

    async fn get_organization(
        &self,
        id: &str,
    ) -> Result<Option<OrganizationWithEnsembles>, StoreError>;

    async fn get_organization_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<OrganizationWithEnsembles>, StoreError>;

    async fn create_organization(
        &self,
        new: NewOrganization,
    ) -> Result<Organization, StoreError>;

    async fn update_organization(
        &self,
        id: &str,
        update: NewOrganization,
    ) -> Result<Option<Organization>, StoreError>;

    async fn list_ensembles(&self) -> Result<Vec<Ensemble>, StoreError>;

    async fn list_ensembles_by_organization(
        &self,
        organization_id: &str,
    ) -> Result<Vec<Ensemble>, StoreError>;

    async fn create_ensemble(&self, new: NewEnsemble) -> Result<Ensemble, StoreError>;

    async fn update_ensemble(
        &self,
        id: &str,
        update: NewEnsemble,
    ) -> Result<Option<Ensemble>, StoreError>;
}

/// Empty submitted values collapse to null so absent and cleared fields
/// persist identically.
pub(crate) fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub(crate) fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

pub(crate) fn require_organization_name(new: &NewOrganization) -> Result<(), StoreError> {
    if new.name.trim().is_empty() {
        return Err(StoreError::Validation(
            "Organization name is required".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn require_ensemble_fields(new: &NewEnsemble) -> Result<(), StoreError> {
    if new.name.trim().is_empty() {
        return Err(StoreError::Validation(
            "Ensemble name is required".to_string(),
        ));
    }
    if new.organization_id.trim().is_empty() {
        return Err(StoreError::Validation(
            "Organization ID is required".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn organization_record(new: NewOrganization, id: String) -> Organization {
    Organization {
        id,
        name: new.name,
        short_name: normalize(new.short_name),
        url_slug: normalize(new.url_slug),
        website: normalize(new.website),
        social_media: normalize(new.social_media),
        email: normalize(new.email),
        religious_affiliation: normalize(new.religious_affiliation),
        mission_statement: normalize(new.mission_statement),
        goals: normalize(new.goals),
    }
}

/// Builds the persisted ensemble record. `organization_name` always comes
/// from the parent organization, not the submission.
pub(crate) fn ensemble_record(new: NewEnsemble, id: String, parent_name: &str) -> Ensemble {
    Ensemble {
        id,
        name: new.name,
        organization_id: new.organization_id,
        organization_name: Some(parent_name.to_string()),
        short_name: normalize(new.short_name),
        website: normalize(new.website),
        director: normalize(new.director),
        age_group: normalize(new.age_group),
        voice_type: normalize(new.voice_type),
        ensemble_type: normalize(new.ensemble_type),
        location: normalize(new.location),
        auditioned: normalize(new.auditioned),
        pay_level: normalize(new.pay_level),
        age_restrictions: normalize(new.age_restrictions),
        other_restrictions: normalize(new.other_restrictions),
        season: normalize(new.season),
        rehearsal_details: normalize(new.rehearsal_details),
        description: normalize(new.description),
    }
}
