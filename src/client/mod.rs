//! Remote instance control.
//!
//! [`InstanceControlClient`] is the capability boundary for talking to one
//! running instance over its own management protocol. Keeping it a trait lets
//! alternate transports or instance protocols substitute in; the shipped
//! implementation is the HTTP adapter in [`HttpInstanceClient`].
//!
//! Return-value contract, shared by every method:
//! - `Ok(Some(_))` — the instance answered and knows the key/feature.
//! - `Ok(None)` — the instance answered but the key/feature does not exist
//!   there ("not configured").
//! - `Err(_)` — the instance could not be reached or gave a malformed answer
//!   ("unreachable"). Aggregation logic must never fold this into `None`.

mod http;

pub use http::{HttpInstanceClient, HttpInstanceClientConfig};

use crate::types::{CircuitBreakerState, CircuitBreakerStatus, Instance, TenacityConfiguration};
use crate::Result;
use async_trait::async_trait;

/// Capability interface bound to one addressable running instance.
#[async_trait]
pub trait InstanceControlClient: Send + Sync {
    /// The property keys this instance has configured, in the instance's own
    /// reported order.
    async fn property_keys(&self, instance: &Instance) -> Result<Option<Vec<String>>>;

    /// The live configuration the instance holds for one property key.
    async fn configuration(
        &self,
        instance: &Instance,
        key: &str,
    ) -> Result<Option<TenacityConfiguration>>;

    /// All circuit breakers on the instance.
    async fn circuit_breakers(
        &self,
        instance: &Instance,
    ) -> Result<Option<Vec<CircuitBreakerStatus>>>;

    /// One circuit breaker by property key.
    async fn circuit_breaker(
        &self,
        instance: &Instance,
        key: &str,
    ) -> Result<Option<CircuitBreakerStatus>>;

    /// Force a circuit breaker into a new state, returning the status the
    /// instance reports after the mutation.
    async fn set_circuit_breaker_state(
        &self,
        instance: &Instance,
        key: &str,
        state: CircuitBreakerState,
    ) -> Result<Option<CircuitBreakerStatus>>;
}
