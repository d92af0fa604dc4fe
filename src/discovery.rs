//! Live property-key discovery across the instances backing a service.
//!
//! The directory answers "who is running this service right now"; discovery
//! fans one management call out to every instance and unions whatever comes
//! back. A slow or dead instance costs at most the configured per-call bound
//! and is dropped from the union — it never fails the aggregate.

use crate::client::InstanceControlClient;
use crate::types::{Instance, ServiceId};
use crate::Result;
use async_trait::async_trait;
use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

/// Source of the instances currently backing a service. Instances are
/// ephemeral: resolved at call time, never persisted.
#[async_trait]
pub trait InstanceDirectory: Send + Sync {
    async fn instances(&self, service: &ServiceId) -> Result<Vec<Instance>>;
}

/// Fixed service→instances mapping, configured up front. Suited to tests and
/// deployments without a dynamic registry.
#[derive(Default)]
pub struct StaticDirectory {
    entries: HashMap<ServiceId, Vec<Instance>>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service(mut self, service: ServiceId, instances: Vec<Instance>) -> Self {
        self.entries.insert(service, instances);
        self
    }
}

#[async_trait]
impl InstanceDirectory for StaticDirectory {
    async fn instances(&self, service: &ServiceId) -> Result<Vec<Instance>> {
        Ok(self.entries.get(service).cloned().unwrap_or_default())
    }
}

/// Aggregates property keys across all instances backing a service.
pub struct PropertyKeyDiscovery {
    directory: Arc<dyn InstanceDirectory>,
    client: Arc<dyn InstanceControlClient>,
    /// Upper bound on each instance's share of the fan-out.
    instance_timeout: Duration,
}

impl PropertyKeyDiscovery {
    pub fn new(
        directory: Arc<dyn InstanceDirectory>,
        client: Arc<dyn InstanceControlClient>,
        instance_timeout: Duration,
    ) -> Self {
        Self {
            directory,
            client,
            instance_timeout,
        }
    }

    /// Union of property keys reported by reachable instances. Set semantics:
    /// duplicate keys across instances collapse. Empty when no instance is
    /// reachable or none report keys.
    pub async fn discover(&self, service: &ServiceId) -> Result<HashSet<String>> {
        let instances = self.directory.instances(service).await?;

        let calls = instances.iter().map(|instance| async move {
            let outcome =
                tokio::time::timeout(self.instance_timeout, self.client.property_keys(instance))
                    .await;
            (instance, outcome)
        });

        let mut union = HashSet::new();
        for (instance, outcome) in join_all(calls).await {
            match outcome {
                Ok(Ok(Some(keys))) => union.extend(keys),
                Ok(Ok(None)) => {}
                Ok(Err(e)) => {
                    tracing::warn!(
                        service = %service,
                        instance = %instance,
                        error = %e,
                        "excluding instance from property key discovery"
                    );
                }
                Err(_) => {
                    tracing::warn!(
                        service = %service,
                        instance = %instance,
                        timeout_ms = self.instance_timeout.as_millis() as u64,
                        "instance timed out during property key discovery"
                    );
                }
            }
        }
        Ok(union)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CircuitBreakerState, CircuitBreakerStatus, TenacityConfiguration};
    use crate::Error;

    /// Scripted client: each instance either answers with keys or fails.
    struct ScriptedClient {
        answers: HashMap<Instance, Option<Vec<String>>>,
    }

    #[async_trait]
    impl InstanceControlClient for ScriptedClient {
        async fn property_keys(&self, instance: &Instance) -> Result<Option<Vec<String>>> {
            match self.answers.get(instance) {
                Some(keys) => Ok(keys.clone()),
                None => Err(Error::store(format!("scripted failure for {instance}"))),
            }
        }

        async fn configuration(
            &self,
            _: &Instance,
            _: &str,
        ) -> Result<Option<TenacityConfiguration>> {
            Ok(None)
        }

        async fn circuit_breakers(
            &self,
            _: &Instance,
        ) -> Result<Option<Vec<CircuitBreakerStatus>>> {
            Ok(None)
        }

        async fn circuit_breaker(
            &self,
            _: &Instance,
            _: &str,
        ) -> Result<Option<CircuitBreakerStatus>> {
            Ok(None)
        }

        async fn set_circuit_breaker_state(
            &self,
            _: &Instance,
            _: &str,
            _: CircuitBreakerState,
        ) -> Result<Option<CircuitBreakerStatus>> {
            Ok(None)
        }
    }

    fn fixture(
        instances: Vec<Instance>,
        answers: HashMap<Instance, Option<Vec<String>>>,
    ) -> PropertyKeyDiscovery {
        let service = ServiceId::new("checkout").unwrap();
        let directory = StaticDirectory::new().with_service(service, instances);
        PropertyKeyDiscovery::new(
            Arc::new(directory),
            Arc::new(ScriptedClient { answers }),
            Duration::from_millis(500),
        )
    }

    #[tokio::test]
    async fn test_union_collapses_duplicate_keys() {
        let a = Instance::new("10.0.0.1", 8080);
        let b = Instance::new("10.0.0.2", 8080);
        let mut answers = HashMap::new();
        answers.insert(
            a.clone(),
            Some(vec!["inventory-api".to_string(), "payments".to_string()]),
        );
        answers.insert(
            b.clone(),
            Some(vec!["inventory-api".to_string(), "auth".to_string()]),
        );

        let discovery = fixture(vec![a, b], answers);
        let keys = discovery
            .discover(&ServiceId::new("checkout").unwrap())
            .await
            .unwrap();
        assert_eq!(keys.len(), 3);
        assert!(keys.contains("inventory-api"));
        assert!(keys.contains("payments"));
        assert!(keys.contains("auth"));
    }

    #[tokio::test]
    async fn test_failing_instance_excluded_not_fatal() {
        let healthy = Instance::new("10.0.0.1", 8080);
        let dead = Instance::new("10.0.0.9", 8080);
        let mut answers = HashMap::new();
        answers.insert(healthy.clone(), Some(vec!["inventory-api".to_string()]));
        // no entry for `dead` → scripted error

        let discovery = fixture(vec![healthy, dead], answers);
        let keys = discovery
            .discover(&ServiceId::new("checkout").unwrap())
            .await
            .unwrap();
        assert_eq!(keys.len(), 1);
        assert!(keys.contains("inventory-api"));
    }

    #[tokio::test]
    async fn test_no_reachable_instances_yields_empty_set() {
        let dead = Instance::new("10.0.0.9", 8080);
        let discovery = fixture(vec![dead], HashMap::new());
        let keys = discovery
            .discover(&ServiceId::new("checkout").unwrap())
            .await
            .unwrap();
        assert!(keys.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_service_yields_empty_set() {
        let discovery = fixture(vec![], HashMap::new());
        let keys = discovery
            .discover(&ServiceId::new("unknown-service").unwrap())
            .await
            .unwrap();
        assert!(keys.is_empty());
    }
}
