use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::sync::Mutex;

use crate::db::store::{
    ensemble_record, new_record_id, organization_record, require_ensemble_fields,
    require_organization_name, Store, StoreError,
};
use crate::models::ensemble::{Ensemble, NewEnsemble};
use crate::models::organization::{NewOrganization, Organization, OrganizationWithEnsembles};

const ORGANIZATIONS_FILE: &str = "organizations.json";
const ENSEMBLES_FILE: &str = "ensembles.json";

/// File-backed store: one JSON array per collection under a data directory.
///
/// Every mutation is read-entire-file, modify, write-entire-file. Writes are
/// serialized behind a mutex and land via a temp file + rename so a failed
/// write never leaves a half-written collection behind. Reads take no lock;
/// the dataset is small enough that full scans per request are fine.
pub struct JsonStore {
    organizations_file: PathBuf,
    ensembles_file: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    /// Creates the data directory if needed and returns a store over it.
    pub async fn open(data_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir)
            .await
            .map_err(StoreError::Write)?;
        Ok(Self {
            organizations_file: data_dir.join(ORGANIZATIONS_FILE),
            ensembles_file: data_dir.join(ENSEMBLES_FILE),
            write_lock: Mutex::new(()),
        })
    }

    async fn read_collection<T: DeserializeOwned>(
        &self,
        path: &Path,
    ) -> Result<Vec<T>, StoreError> {
        let raw = match fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::Read(err)),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(StoreError::Parse)
    }

    async fn write_collection<T: Serialize>(
        &self,
        path: &Path,
        records: &[T],
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|err| StoreError::Write(std::io::Error::new(ErrorKind::InvalidData, err)))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).await.map_err(StoreError::Write)?;
        fs::rename(&tmp, path).await.map_err(StoreError::Write)?;
        Ok(())
    }

    async fn join_ensembles(
        &self,
        organization: Organization,
    ) -> Result<OrganizationWithEnsembles, StoreError> {
        let ensembles: Vec<Ensemble> = self.read_collection(&self.ensembles_file).await?;
        let ensembles = ensembles
            .into_iter()
            .filter(|e| e.organization_id == organization.id)
            .collect();
        Ok(OrganizationWithEnsembles {
            organization,
            ensembles,
        })
    }
}

#[async_trait]
impl Store for JsonStore {
    async fn list_organizations(&self) -> Result<Vec<Organization>, StoreError> {
        self.read_collection(&self.organizations_file).await
    }

    async fn get_organization(
        &self,
        id: &str,
    ) -> Result<Option<OrganizationWithEnsembles>, StoreError> {
        if id.trim().is_empty() {
            return Err(StoreError::InvalidArgument(
                "Invalid organization ID provided".to_string(),
            ));
        }
        let organizations = self.list_organizations().await?;
        match organizations.into_iter().find(|org| org.id == id) {
            Some(organization) => Ok(Some(self.join_ensembles(organization).await?)),
            None => Ok(None),
        }
    }

    async fn get_organization_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<OrganizationWithEnsembles>, StoreError> {
        if slug.trim().is_empty() {
            return Err(StoreError::InvalidArgument(
                "Invalid organization slug provided".to_string(),
            ));
        }
        let organizations = self.list_organizations().await?;
        match organizations
            .into_iter()
            .find(|org| org.url_slug.as_deref() == Some(slug))
        {
            Some(organization) => Ok(Some(self.join_ensembles(organization).await?)),
            None => Ok(None),
        }
    }

    async fn create_organization(
        &self,
        new: NewOrganization,
    ) -> Result<Organization, StoreError> {
        require_organization_name(&new)?;

        let _guard = self.write_lock.lock().await;
        let mut organizations: Vec<Organization> =
            self.read_collection(&self.organizations_file).await?;
        let organization = organization_record(new, new_record_id());
        organizations.push(organization.clone());
        self.write_collection(&self.organizations_file, &organizations)
            .await?;
        Ok(organization)
    }

    async fn update_organization(
        &self,
        id: &str,
        update: NewOrganization,
    ) -> Result<Option<Organization>, StoreError> {
        if id.trim().is_empty() {
            return Err(StoreError::InvalidArgument(
                "Invalid organization ID provided".to_string(),
            ));
        }
        require_organization_name(&update)?;

        let _guard = self.write_lock.lock().await;
        let mut organizations: Vec<Organization> =
            self.read_collection(&self.organizations_file).await?;
        let Some(index) = organizations.iter().position(|org| org.id == id) else {
            return Ok(None);
        };

        let previous_name = organizations[index].name.clone();
        let organization = organization_record(update, id.to_string());
        organizations[index] = organization.clone();
        self.write_collection(&self.organizations_file, &organizations)
            .await?;

        // Keep the denormalized organizationName on child ensembles in sync
        // with the parent after a rename.
        if previous_name != organization.name {
            let mut ensembles: Vec<Ensemble> = self.read_collection(&self.ensembles_file).await?;
            let mut changed = false;
            for ensemble in ensembles.iter_mut() {
                if ensemble.organization_id == id {
                    ensemble.organization_name = Some(organization.name.clone());
                    changed = true;
                }
            }
            if changed {
                self.write_collection(&self.ensembles_file, &ensembles)
                    .await?;
            }
        }

        Ok(Some(organization))
    }

    async fn list_ensembles(&self) -> Result<Vec<Ensemble>, StoreError> {
        self.read_collection(&self.ensembles_file).await
    }

    async fn list_ensembles_by_organization(
        &self,
        organization_id: &str,
    ) -> Result<Vec<Ensemble>, StoreError> {
        if organization_id.trim().is_empty() {
            return Err(StoreError::InvalidArgument(
                "Invalid organization ID provided".to_string(),
            ));
        }
        let ensembles = self.list_ensembles().await?;
        Ok(ensembles
            .into_iter()
            .filter(|e| e.organization_id == organization_id)
            .collect())
    }

    async fn create_ensemble(&self, new: NewEnsemble) -> Result<Ensemble, StoreError> {
        require_ensemble_fields(&new)?;

        let _guard = self.write_lock.lock().await;
        let organizations: Vec<Organization> =
            self.read_collection(&self.organizations_file).await?;
        let parent_name = organizations
            .iter()
            .find(|org| org.id == new.organization_id)
            .map(|org| org.name.clone())
            .ok_or_else(|| StoreError::UnknownOrganization(new.organization_id.clone()))?;

        let mut ensembles: Vec<Ensemble> = self.read_collection(&self.ensembles_file).await?;
        let ensemble = ensemble_record(new, new_record_id(), &parent_name);
        ensembles.push(ensemble.clone());
        self.write_collection(&self.ensembles_file, &ensembles)
            .await?;
        Ok(ensemble)
    }

    async fn update_ensemble(
        &self,
        id: &str,
        update: NewEnsemble,
    ) -> Result<Option<Ensemble>, StoreError> {
        if id.trim().is_empty() {
            return Err(StoreError::InvalidArgument(
                "Invalid ensemble ID provided".to_string(),
            ));
        }
        require_ensemble_fields(&update)?;

        let _guard = self.write_lock.lock().await;
        let organizations: Vec<Organization> =
            self.read_collection(&self.organizations_file).await?;
        let parent_name = organizations
            .iter()
            .find(|org| org.id == update.organization_id)
            .map(|org| org.name.clone())
            .ok_or_else(|| StoreError::UnknownOrganization(update.organization_id.clone()))?;

        let mut ensembles: Vec<Ensemble> = self.read_collection(&self.ensembles_file).await?;
        let Some(index) = ensembles.iter().position(|e| e.id == id) else {
            return Ok(None);
        };
        let ensemble = ensemble_record(update, id.to_string(), &parent_name);
        ensembles[index] = ensemble.clone();
        self.write_collection(&self.ensembles_file, &ensembles)
            .await?;
        Ok(Some(ensemble))
    }
}
