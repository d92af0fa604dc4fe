use super::ConfigStore;
use crate::types::{DependencyEntity, DependencyId, ServiceEntity, ServiceId};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory entity store. Snapshots are keyed by (service, dependency);
/// history is a plain append-only vector per dependency.
#[derive(Clone, Default)]
pub struct MemoryStore {
    snapshots: Arc<RwLock<HashMap<(ServiceId, DependencyId), ServiceEntity>>>,
    history: Arc<RwLock<HashMap<DependencyId, Vec<DependencyEntity>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn retrieve(
        &self,
        service: &ServiceId,
        dependency: &DependencyId,
    ) -> Result<Option<ServiceEntity>> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|_| Error::store("snapshot lock poisoned"))?;
        Ok(snapshots
            .get(&(service.clone(), dependency.clone()))
            .cloned())
    }

    async fn list_dependency_configurations(
        &self,
        dependency: &DependencyId,
    ) -> Result<Vec<DependencyEntity>> {
        let history = self
            .history
            .read()
            .map_err(|_| Error::store("history lock poisoned"))?;
        Ok(history.get(dependency).cloned().unwrap_or_default())
    }

    async fn store_dependency_entity(&self, entity: DependencyEntity) -> Result<bool> {
        let mut history = self
            .history
            .write()
            .map_err(|_| Error::store("history lock poisoned"))?;
        history
            .entry(entity.dependency_id.clone())
            .or_default()
            .push(entity);
        Ok(true)
    }

    async fn store_service_entity(&self, entity: ServiceEntity) -> Result<bool> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| Error::store("snapshot lock poisoned"))?;
        snapshots.insert(
            (entity.service_id.clone(), entity.dependency_id.clone()),
            entity,
        );
        Ok(true)
    }
}
