//! Stored entities and the ephemeral instance address.

use super::config::TenacityConfiguration;
use super::ids::{DependencyId, ServiceId};
use crate::Result;
use serde::{Deserialize, Serialize};
use url::Url;

/// Current configuration snapshot for one (service, dependency) pair.
///
/// Mutable pointer semantics: at most one live row per pair, overwritten on
/// each successful commit, never versioned. History lives in
/// [`DependencyEntity`] rows instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEntity {
    pub service_id: ServiceId,
    pub dependency_id: DependencyId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<TenacityConfiguration>,
}

impl ServiceEntity {
    /// An empty snapshot for a pair with nothing stored yet. Synthesized on
    /// the read path; never persisted as a side effect of reading.
    pub fn empty(service_id: ServiceId, dependency_id: DependencyId) -> Self {
        Self {
            service_id,
            dependency_id,
            configuration: None,
        }
    }

    pub fn with_configuration(
        service_id: ServiceId,
        dependency_id: DependencyId,
        configuration: TenacityConfiguration,
    ) -> Self {
        Self {
            service_id,
            dependency_id,
            configuration: Some(configuration),
        }
    }
}

/// Append-only history row recording one configuration change.
///
/// Never mutated after creation; ordered by timestamp for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyEntity {
    pub dependency_id: DependencyId,
    pub timestamp_millis: u64,
    pub configuration: TenacityConfiguration,
    /// Never empty; the commit path substitutes `unknown_user` when the
    /// caller identity cannot be resolved.
    pub authored_by: String,
}

/// One running process backing a service, reachable by network address.
/// Discovered at call time, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instance {
    pub host: String,
    pub port: u16,
}

impl Instance {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Base URI of the instance's management endpoint.
    pub fn uri(&self) -> Result<Url> {
        Url::parse(&format!("http://{}:{}", self.host, self.port)).map_err(|e| {
            crate::Error::InvalidIdentifier {
                what: "instance address",
                value: format!("{}:{} ({e})", self.host, self.port),
            }
        })
    }
}

impl std::fmt::Display for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_entity_has_no_configuration() {
        let entity = ServiceEntity::empty(
            ServiceId::new("checkout").unwrap(),
            DependencyId::new("inventory-api").unwrap(),
        );
        assert!(entity.configuration.is_none());
    }

    #[test]
    fn test_instance_uri() {
        let instance = Instance::new("10.0.0.7", 8080);
        assert_eq!(instance.uri().unwrap().as_str(), "http://10.0.0.7:8080/");
        assert_eq!(instance.to_string(), "10.0.0.7:8080");
    }
}
