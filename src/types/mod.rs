//! Core type definitions: identifiers, configuration, stored entities, and
//! live circuit-breaker state.

mod circuit;
mod config;
mod entity;
mod ids;

pub use circuit::{CircuitBreakerState, CircuitBreakerStatus};
pub use config::{CircuitBreakerConfiguration, TenacityConfiguration, ThreadPoolConfiguration};
pub use entity::{DependencyEntity, Instance, ServiceEntity};
pub use ids::{DependencyId, ServiceId};
