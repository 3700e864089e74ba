use serde::{Deserialize, Serialize};

/// A performing group belonging to exactly one organization.
///
/// `organization_name` is a denormalized copy of the parent organization's
/// name. It is assigned by the store on every create/update, never taken
/// from the caller. `auditioned` is stored as the strings "True"/"False"
/// to match the persisted data format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ensemble {
    pub id: String,
    pub name: String,
    pub organization_id: String,
    pub organization_name: Option<String>,
    pub short_name: Option<String>,
    pub website: Option<String>,
    pub director: Option<String>,
    pub age_group: Option<String>,
    pub voice_type: Option<String>,
    pub ensemble_type: Option<String>,
    pub location: Option<String>,
    pub auditioned: Option<String>,
    pub pay_level: Option<String>,
    pub age_restrictions: Option<String>,
    pub other_restrictions: Option<String>,
    pub season: Option<String>,
    pub rehearsal_details: Option<String>,
    pub description: Option<String>,
}

/// Submission payload for creating or updating an ensemble.
/// `organization_name` is accepted for wire compatibility with the admin
/// client but ignored: the store overwrites it from the parent record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewEnsemble {
    pub name: String,
    pub organization_id: String,
    pub organization_name: Option<String>,
    pub short_name: Option<String>,
    pub website: Option<String>,
    pub director: Option<String>,
    pub age_group: Option<String>,
    pub voice_type: Option<String>,
    pub ensemble_type: Option<String>,
    pub location: Option<String>,
    pub auditioned: Option<String>,
    pub pay_level: Option<String>,
    pub age_restrictions: Option<String>,
    pub other_restrictions: Option<String>,
    pub season: Option<String>,
    pub rehearsal_details: Option<String>,
    pub description: Option<String>,
}
