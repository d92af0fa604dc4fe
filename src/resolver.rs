//! Configuration resolution: store lookup + defaulting + ordering.

use crate::discovery::PropertyKeyDiscovery;
use crate::ordering;
use crate::store::ConfigStore;
use crate::types::{DependencyEntity, DependencyId, ServiceEntity, ServiceId, TenacityConfiguration};
use crate::{Error, Result};
use std::sync::Arc;

/// Everything a caller needs to display one (service, dependency) pair:
/// discovered keys with the requested one first, the effective (fully
/// defaulted) configuration, and the change history most-recent-first.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub service_id: ServiceId,
    pub dependency_id: DependencyId,
    pub ordered_keys: Vec<String>,
    pub configuration: TenacityConfiguration,
    pub history: Vec<DependencyEntity>,
}

/// Outcome of resolving a service without naming a dependency.
#[derive(Debug, Clone)]
pub enum DefaultResolution {
    Resolved(Resolution),
    /// No instance reported any property key for the service.
    NoPropertyKeys(ServiceId),
}

pub struct ConfigResolver {
    store: Arc<dyn ConfigStore>,
    discovery: Arc<PropertyKeyDiscovery>,
}

impl ConfigResolver {
    pub fn new(store: Arc<dyn ConfigStore>, discovery: Arc<PropertyKeyDiscovery>) -> Self {
        Self { store, discovery }
    }

    /// Full resolution for a named pair.
    ///
    /// A pair with nothing stored resolves to the library-default
    /// configuration; nothing is persisted by reading, so resolving the same
    /// missing pair twice gives the same answer.
    pub async fn resolve(
        &self,
        service: &ServiceId,
        dependency: &DependencyId,
    ) -> Result<Resolution> {
        let snapshot = self
            .store
            .retrieve(service, dependency)
            .await?
            .unwrap_or_else(|| ServiceEntity::empty(service.clone(), dependency.clone()));

        let configuration = snapshot
            .configuration
            .unwrap_or_default()
            .effective();

        let keys = self.discovery.discover(service).await?;
        let ordered_keys = ordering::sort_keys_first(dependency, &keys);

        let history = self.store.list_dependency_configurations(dependency).await?;
        let history = ordering::sort_history_descending(history);

        tracing::debug!(
            service = %service,
            dependency = %dependency,
            keys = ordered_keys.len(),
            history_rows = history.len(),
            "resolved configuration"
        );

        Ok(Resolution {
            service_id: service.clone(),
            dependency_id: dependency.clone(),
            ordered_keys,
            configuration,
            history,
        })
    }

    /// Resolve a service with no explicit dependency: pick the first
    /// discovered key (minimum of the unordered set, so repeated calls agree)
    /// or report that the service has no property keys at all.
    pub async fn resolve_default(&self, service: &ServiceId) -> Result<DefaultResolution> {
        let keys = self.discovery.discover(service).await?;
        let first = match keys.iter().min() {
            Some(key) => DependencyId::new(key)?,
            None => return Ok(DefaultResolution::NoPropertyKeys(service.clone())),
        };
        Ok(DefaultResolution::Resolved(
            self.resolve(service, &first).await?,
        ))
    }

    /// The stored configuration for a pair, exactly as committed.
    ///
    /// Data-fetch path: unlike [`resolve`](Self::resolve) this never
    /// substitutes defaults — a pair with no committed configuration is
    /// [`Error::NotFound`].
    pub async fn configuration(
        &self,
        service: &ServiceId,
        dependency: &DependencyId,
    ) -> Result<TenacityConfiguration> {
        self.store
            .retrieve(service, dependency)
            .await?
            .and_then(|entity| entity.configuration)
            .ok_or_else(|| Error::NotFound {
                service: service.to_string(),
                dependency: dependency.to_string(),
            })
    }
}
