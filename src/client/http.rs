use crate::types::{CircuitBreakerState, CircuitBreakerStatus, Instance, TenacityConfiguration};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::env;
use std::time::Duration;

/// Settings for the HTTP adapter. The per-call timeout is injected here
/// rather than hard-coded; discovery uses it as the bound on each instance's
/// share of a fan-out.
#[derive(Debug, Clone)]
pub struct HttpInstanceClientConfig {
    pub timeout: Duration,
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpInstanceClientConfig {
    fn default() -> Self {
        // Minimal production-friendly defaults (env-overridable).
        let timeout_secs = env::var("FUSEGATE_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(5);
        let pool_max_idle = env::var("FUSEGATE_HTTP_POOL_MAX_IDLE_PER_HOST")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(16);
        Self {
            timeout: Duration::from_secs(timeout_secs),
            pool_max_idle_per_host: pool_max_idle,
        }
    }
}

/// HTTP adapter for the instance management protocol.
///
/// One shared `reqwest::Client` serves every instance; the target address is
/// derived per call from [`Instance::uri`]. A 404 from a reachable instance
/// maps to `Ok(None)`; connect/timeout failures map to
/// [`Error::InstanceUnreachable`] so callers can tell the two apart.
pub struct HttpInstanceClient {
    client: reqwest::Client,
    config: HttpInstanceClientConfig,
}

impl HttpInstanceClient {
    pub fn new(config: HttpInstanceClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(HttpInstanceClientConfig::default())
    }

    /// The timeout each individual instance call is bounded by.
    pub fn call_timeout(&self) -> Duration {
        self.config.timeout
    }

    fn endpoint(&self, instance: &Instance, path: &str) -> Result<String> {
        let base = instance.uri()?;
        Ok(format!("{}tenacity/{}", base, path))
    }

    fn unreachable(instance: &Instance, source: reqwest::Error) -> Error {
        tracing::warn!(instance = %instance, error = %source, "instance unreachable");
        Error::InstanceUnreachable {
            instance: instance.to_string(),
            source,
        }
    }

    async fn decode<T: DeserializeOwned>(url: &str, response: reqwest::Response) -> Result<Option<T>> {
        match response.status().as_u16() {
            404 => Ok(None),
            s if (200..300).contains(&s) => {
                // Reachable but malformed: a transport fault, not "unreachable".
                let body = response.json::<T>().await.map_err(Error::Transport)?;
                Ok(Some(body))
            }
            s => Err(Error::UnexpectedStatus {
                status: s,
                url: url.to_string(),
            }),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        instance: &Instance,
        path: &str,
    ) -> Result<Option<T>> {
        let url = self.endpoint(instance, path)?;
        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| Self::unreachable(instance, e))?;
        Self::decode(&url, response).await
    }
}

#[async_trait]
impl super::InstanceControlClient for HttpInstanceClient {
    async fn property_keys(&self, instance: &Instance) -> Result<Option<Vec<String>>> {
        self.get_json(instance, "propertykeys").await
    }

    async fn configuration(
        &self,
        instance: &Instance,
        key: &str,
    ) -> Result<Option<TenacityConfiguration>> {
        self.get_json(instance, &format!("configuration/{key}")).await
    }

    async fn circuit_breakers(
        &self,
        instance: &Instance,
    ) -> Result<Option<Vec<CircuitBreakerStatus>>> {
        self.get_json(instance, "circuitbreakers").await
    }

    async fn circuit_breaker(
        &self,
        instance: &Instance,
        key: &str,
    ) -> Result<Option<CircuitBreakerStatus>> {
        self.get_json(instance, &format!("circuitbreakers/{key}")).await
    }

    async fn set_circuit_breaker_state(
        &self,
        instance: &Instance,
        key: &str,
        state: CircuitBreakerState,
    ) -> Result<Option<CircuitBreakerStatus>> {
        let url = self.endpoint(instance, &format!("circuitbreakers/{key}"))?;
        let response = self
            .client
            .put(&url)
            .header("accept", "application/json")
            .header("content-type", "text/plain")
            .body(state.as_str())
            .send()
            .await
            .map_err(|e| Self::unreachable(instance, e))?;
        Self::decode(&url, response).await
    }
}
