//! The `Fusegate` facade: one entry point wiring directory, instance client,
//! store, resolver, and commit coordinator together.

use crate::client::{HttpInstanceClient, InstanceControlClient};
use crate::commit::CommitCoordinator;
use crate::discovery::{InstanceDirectory, PropertyKeyDiscovery, StaticDirectory};
use crate::resolver::{ConfigResolver, DefaultResolution, Resolution};
use crate::store::{ConfigStore, MemoryStore};
use crate::types::{
    CircuitBreakerState, CircuitBreakerStatus, DependencyId, Instance, ServiceId,
    TenacityConfiguration,
};
use crate::Result;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Resilience-configuration service for a fleet.
///
/// Read paths degrade gracefully (empty key sets, defaulted configuration);
/// the write path is all-or-nothing from the caller's perspective even though
/// the underlying two-step store write is not transactional.
pub struct Fusegate {
    resolver: ConfigResolver,
    coordinator: CommitCoordinator,
    discovery: Arc<PropertyKeyDiscovery>,
    client: Arc<dyn InstanceControlClient>,
}

impl Fusegate {
    pub fn builder() -> FusegateBuilder {
        FusegateBuilder::new()
    }

    /// Full resolution for a named (service, dependency) pair.
    pub async fn resolve(
        &self,
        service: &ServiceId,
        dependency: &DependencyId,
    ) -> Result<Resolution> {
        self.resolver.resolve(service, dependency).await
    }

    /// Resolution for a service's first discovered dependency, or a
    /// no-property-keys outcome when nothing is discovered.
    pub async fn resolve_default(&self, service: &ServiceId) -> Result<DefaultResolution> {
        self.resolver.resolve_default(service).await
    }

    /// The committed configuration for a pair; `Error::NotFound` when none
    /// has ever been committed. Never substitutes defaults.
    pub async fn configuration(
        &self,
        service: &ServiceId,
        dependency: &DependencyId,
    ) -> Result<TenacityConfiguration> {
        self.resolver.configuration(service, dependency).await
    }

    /// Commit a configuration change. `Ok(true)` only when both the history
    /// append and the snapshot upsert succeed.
    pub async fn configure(
        &self,
        service: &ServiceId,
        dependency: &DependencyId,
        configuration: TenacityConfiguration,
        username: Option<&str>,
    ) -> Result<bool> {
        self.coordinator
            .configure(service, dependency, configuration, username)
            .await
    }

    /// Union of property keys across every reachable instance of a service.
    pub async fn property_keys(&self, service: &ServiceId) -> Result<HashSet<String>> {
        self.discovery.discover(service).await
    }

    /// All circuit breakers on one instance. `Ok(None)` means the instance
    /// answered but exposes none.
    pub async fn circuit_breakers(
        &self,
        instance: &Instance,
    ) -> Result<Option<Vec<CircuitBreakerStatus>>> {
        self.client.circuit_breakers(instance).await
    }

    /// One circuit breaker on one instance, by property key.
    pub async fn circuit_breaker(
        &self,
        instance: &Instance,
        key: &str,
    ) -> Result<Option<CircuitBreakerStatus>> {
        self.client.circuit_breaker(instance, key).await
    }

    /// Force a circuit breaker open, closed, or half-open on one instance.
    pub async fn set_circuit_breaker(
        &self,
        instance: &Instance,
        key: &str,
        state: CircuitBreakerState,
    ) -> Result<Option<CircuitBreakerStatus>> {
        self.client.set_circuit_breaker_state(instance, key, state).await
    }
}

/// Builder for [`Fusegate`].
///
/// Keep this surface area small and predictable: every collaborator has a
/// working default (in-memory store, empty directory, HTTP instance client)
/// and can be swapped for tests or alternate deployments.
pub struct FusegateBuilder {
    store: Option<Arc<dyn ConfigStore>>,
    directory: Option<Arc<dyn InstanceDirectory>>,
    instance_client: Option<Arc<dyn InstanceControlClient>>,
    instance_timeout: Option<Duration>,
}

impl FusegateBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            directory: None,
            instance_client: None,
            instance_timeout: None,
        }
    }

    /// Swap the entity store (defaults to [`MemoryStore`]).
    pub fn store(mut self, store: Arc<dyn ConfigStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the instance directory (defaults to an empty [`StaticDirectory`]).
    pub fn directory(mut self, directory: Arc<dyn InstanceDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Swap the instance control client (defaults to [`HttpInstanceClient`]).
    pub fn instance_client(mut self, client: Arc<dyn InstanceControlClient>) -> Self {
        self.instance_client = Some(client);
        self
    }

    /// Bound on each instance's share of a discovery fan-out.
    pub fn instance_timeout(mut self, timeout: Duration) -> Self {
        self.instance_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<Fusegate> {
        let store = match self.store {
            Some(store) => store,
            None => Arc::new(MemoryStore::new()),
        };
        let directory = match self.directory {
            Some(directory) => directory,
            None => Arc::new(StaticDirectory::new()),
        };
        let (client, default_timeout): (Arc<dyn InstanceControlClient>, Duration) =
            match self.instance_client {
                Some(client) => (client, Duration::from_secs(5)),
                None => {
                    let http = HttpInstanceClient::with_defaults()?;
                    let timeout = http.call_timeout();
                    (Arc::new(http), timeout)
                }
            };
        let instance_timeout = self.instance_timeout.unwrap_or(default_timeout);

        let discovery = Arc::new(PropertyKeyDiscovery::new(
            directory,
            client.clone(),
            instance_timeout,
        ));
        Ok(Fusegate {
            resolver: ConfigResolver::new(store.clone(), discovery.clone()),
            coordinator: CommitCoordinator::new(store),
            discovery,
            client,
        })
    }
}

impl Default for FusegateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
