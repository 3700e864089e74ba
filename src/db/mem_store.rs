use std::io::{Error as IoError, ErrorKind};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::db::store::{
    ensemble_record, new_record_id, organization_record, require_ensemble_fields,
    require_organization_name, Store, StoreError,
};
use crate::models::ensemble::{Ensemble, NewEnsemble};
use crate::models::organization::{NewOrganization, Organization, OrganizationWithEnsembles};

/// In-memory store with the same validation and normalization rules as
/// `JsonStore`. Used by route tests; `should_fail` forces every operation
/// into the storage error path.
#[derive(Default)]
pub struct MemStore {
    organizations: Mutex<Vec<Organization>>,
    ensembles: Mutex<Vec<Ensemble>>,
    pub should_fail: bool,
}

impl MemStore {
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    pub fn with_data(organizations: Vec<Organization>, ensembles: Vec<Ensemble>) -> Self {
        Self {
            organizations: Mutex::new(organizations),
            ensembles: Mutex::new(ensembles),
            should_fail: false,
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.should_fail {
            return Err(StoreError::Read(IoError::new(
                ErrorKind::Other,
                "mem store failure",
            )));
        }
        Ok(())
    }

    fn organizations(&self) -> Vec<Organization> {
        self.organizations.lock().expect("lock poisoned").clone()
    }

    fn ensembles(&self) -> Vec<Ensemble> {
        self.ensembles.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl Store for MemStore {
    async fn list_organizations(&self) -> Result<Vec<Organization>, StoreError> {
        self.check()?;
        Ok(self.organizations())
    }

    async fn get_organization(
        &self,
        id: &str,
    ) -> Result<Option<OrganizationWithEnsembles>, StoreError> {
        self.check()?;
        if id.trim().is_empty() {
            return Err(StoreError::InvalidArgument(
                "Invalid organization ID provided".to_string(),
            ));
        }
        let Some(organization) = self.organizations().into_iter().find(|org| org.id == id) else {
            return Ok(None);
        };
        let ensembles = self
            .ensembles()
            .into_iter()
            .filter(|e| e.organization_id == organization.id)
            .collect();
        Ok(Some(OrganizationWithEnsembles {
            organization,
            ensembles,
        }))
    }

    async fn get_organization_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<OrganizationWithEnsembles>, StoreError> {
        self.check()?;
        if slug.trim().is_empty() {
            return Err(StoreError::InvalidArgument(
                "Invalid organization slug provided".to_string(),
            ));
        }
        let Some(organization) = self
            .organizations()
            .into_iter()
            .find(|org| org.url_slug.as_deref() == Some(slug))
        else {
            return Ok(None);
        };
        let ensembles = self
            .ensembles()
            .into_iter()
            .filter(|e| e.organization_id == organization.id)
            .collect();
        Ok(Some(OrganizationWithEnsembles {
            organization,
            ensembles,
        }))
    }

    async fn create_organization(
        &self,
        new: NewOrganization,
    ) -> Result<Organization, StoreError> {
        self.check()?;
        require_organization_name(&new)?;
        let organization = organization_record(new, new_record_id());
        self.organizations
            .lock()
            .expect("lock poisoned")
            .push(organization.clone());
        Ok(organization)
    }

    async fn update_organization(
        &self,
        id: &str,
        update: NewOrganization,
    ) -> Result<Option<Organization>, StoreError> {
        self.check()?;
        if id.trim().is_empty() {
            return Err(StoreError::InvalidArgument(
                "Invalid organization ID provided".to_string(),
            ));
        }
        require_organization_name(&update)?;

        let mut organizations = self.organizations.lock().expect("lock poisoned");
        let Some(index) = organizations.iter().position(|org| org.id == id) else {
            return Ok(None);
        };
        let previous_name = organizations[index].name.clone();
        let organization = organization_record(update, id.to_string());
        organizations[index] = organization.clone();
        drop(organizations);

        if previous_name != organization.name {
            let mut ensembles = self.ensembles.lock().expect("lock poisoned");
            for ensemble in ensembles.iter_mut() {
                if ensemble.organization_id == id {
                    ensemble.organization_name = Some(organization.name.clone());
                }
            }
        }

        Ok(Some(organization))
    }

    async fn list_ensembles(&self) -> Result<Vec<Ensemble>, StoreError> {
        self.check()?;
        Ok(self.ensembles())
    }

    async fn list_ensembles_by_organization(
        &self,
        organization_id: &str,
    ) -> Result<Vec<Ensemble>, StoreError> {
        self.check()?;
        if organization_id.trim().is_empty() {
            return Err(StoreError::InvalidArgument(
                "Invalid organization ID provided".to_string(),
            ));
        }
        Ok(self
            .ensembles()
            .into_iter()
            .filter(|e| e.organization_id == organization_id)
            .collect())
    }

    async fn create_ensemble(&self, new: NewEnsemble) -> Result<Ensemble, StoreError> {
        self.check()?;
        require_ensemble_fields(&new)?;
        let parent_name = self
            .organizations()
            .into_iter()
            .find(|org| org.id == new.organization_id)
            .map(|org| org.name)
            .ok_or_else(|| StoreError::UnknownOrganization(new.organization_id.clone()))?;

        let ensemble = ensemble_record(new, new_record_id(), &parent_name);
        self.ensembles
            .lock()
            .expect("lock poisoned")
            .push(ensemble.clone());
        Ok(ensemble)
    }

    async fn update_ensemble(
        &self,
        id: &str,
        update: NewEnsemble,
    ) -> Result<Option<Ensemble>, StoreError> {
        self.check()?;
        if id.trim().is_empty() {
            return Err(StoreError::InvalidArgument(
                "Invalid ensemble ID provided".to_string(),
            ));
        }
        require_ensemble_fields(&update)?;
        let parent_name = self
            .organizations()
            .into_iter()
            .find(|org| org.id == update.organization_id)
            .map(|org| org.name)
            .ok_or_else(|| StoreError::UnknownOrganization(update.organization_id.clone()))?;

        let mut ensembles = self.ensembles.lock().expect("lock poisoned");
        let Some(index) = ensembles.iter().position(|e| e.id == id) else {
            return Ok(None);
        };
        let ensemble = ensemble_record(update, id.to_string(), &parent_name);
        ensembles[index] = ensemble.clone();
        Ok(Some(ensemble))
    }
}
