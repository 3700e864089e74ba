//! Directory filter engine: joins ensembles to their organizations, applies
//! the free-text search and the five facet filters, and sorts the result for
//! display. Pure functions over full collections; the dataset is small
//! enough to recompute per request.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::ensemble::Ensemble;
use crate::models::organization::Organization;

/// Sentinel facet value meaning "no filter".
pub const FACET_ALL: &str = "all";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DirectoryFilter {
    pub search: String,
    /// Organization facet: an organization id, or "all".
    pub organization: String,
    pub age_group: String,
    pub pay_level: String,
    /// Tri-state: "all", "yes" (stored "True") or "no" (stored "False").
    pub auditioned: String,
    pub voice_type: String,
}

impl Default for DirectoryFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            organization: FACET_ALL.to_string(),
            age_group: FACET_ALL.to_string(),
            pay_level: FACET_ALL.to_string(),
            auditioned: FACET_ALL.to_string(),
            voice_type: FACET_ALL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    pub ensemble: Ensemble,
    pub organization: Organization,
    /// True iff the parent owns more than one ensemble in the unfiltered
    /// collection; the card only shows the organization name then.
    pub show_organization: bool,
}

pub fn build_directory(
    organizations: &[Organization],
    ensembles: &[Ensemble],
    filter: &DirectoryFilter,
) -> Vec<DirectoryEntry> {
    let by_id: HashMap<&str, &Organization> = organizations
        .iter()
        .map(|org| (org.id.as_str(), org))
        .collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for ensemble in ensembles {
        *counts.entry(ensemble.organization_id.as_str()).or_insert(0) += 1;
    }

    let needle = filter.search.to_lowercase();
    let mut entries: Vec<DirectoryEntry> = ensembles
        .iter()
        .filter_map(|ensemble| {
            // Orphaned ensembles are invisible, not an error.
            let organization = *by_id.get(ensemble.organization_id.as_str())?;
            if !matches_search(organization, ensemble, &needle) {
                return None;
            }
            if !matches_facets(ensemble, filter) {
                return None;
            }
            Some(DirectoryEntry {
                ensemble: ensemble.clone(),
                organization: organization.clone(),
                show_organization: counts
                    .get(ensemble.organization_id.as_str())
                    .copied()
                    .unwrap_or(0)
                    > 1,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        a.organization
            .name
            .cmp(&b.organization.name)
            .then_with(|| a.ensemble.name.cmp(&b.ensemble.name))
    });
    entries
}

/// Case-insensitive substring match against the organization side OR the
/// ensemble side; either is sufficient. `needle` must be pre-lowercased.
fn matches_search(organization: &Organization, ensemble: &Ensemble, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    contains(&organization.name, needle)
        || contains_opt(&organization.short_name, needle)
        || contains_opt(&organization.mission_statement, needle)
        || contains(&ensemble.name, needle)
        || contains_opt(&ensemble.ensemble_type, needle)
        || contains_opt(&ensemble.director, needle)
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn contains_opt(haystack: &Option<String>, needle: &str) -> bool {
    haystack.as_deref().is_some_and(|value| contains(value, needle))
}

/// All active facets combine with AND; an unset field never matches an
/// active facet.
fn matches_facets(ensemble: &Ensemble, filter: &DirectoryFilter) -> bool {
    if filter.organization != FACET_ALL && ensemble.organization_id != filter.organization {
        return false;
    }
    if !facet_matches(&filter.age_group, ensemble.age_group.as_deref()) {
        return false;
    }
    if !facet_matches(&filter.pay_level, ensemble.pay_level.as_deref()) {
        return false;
    }
    if filter.auditioned != FACET_ALL {
        let expected = if filter.auditioned == "yes" {
            "True"
        } else {
            "False"
        };
        if ensemble.auditioned.as_deref() != Some(expected) {
            return false;
        }
    }
    facet_matches(&filter.voice_type, ensemble.voice_type.as_deref())
}

fn facet_matches(selected: &str, value: Option<&str>) -> bool {
    selected == FACET_ALL || value == Some(selected)
}
