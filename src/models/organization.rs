use serde::{Deserialize, Serialize};

use crate::models::ensemble::Ensemble;

/// A choral organization as persisted in the organizations collection.
/// Optional fields are serialized as explicit `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub short_name: Option<String>,
    pub url_slug: Option<String>,
    pub website: Option<String>,
    pub social_media: Option<String>,
    pub email: Option<String>,
    pub religious_affiliation: Option<String>,
    pub mission_statement: Option<String>,
    pub goals: Option<String>,
}

/// Submission payload for creating or updating an organization. The id is
/// never client-supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewOrganization {
    pub name: String,
    pub short_name: Option<String>,
    pub url_slug: Option<String>,
    pub website: Option<String>,
    pub social_media: Option<String>,
    pub email: Option<String>,
    pub religious_affiliation: Option<String>,
    pub mission_statement: Option<String>,
    pub goals: Option<String>,
}

/// Read-side join of an organization with its ensembles. Built per request,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationWithEnsembles {
    #[serde(flatten)]
    pub organization: Organization,
    pub ensembles: Vec<Ensemble>,
}
