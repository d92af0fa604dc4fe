//! # fusegate
//!
//! 面向服务集群的弹性配置管理：熔断器与线程池参数的统一配置、下发与实时巡检。
//!
//! Fleet-wide resilience configuration. Fusegate manages circuit-breaker and
//! thread-pool parameters for service→dependency call paths, reconciles the
//! canonical store against the dependency keys running instances actually
//! report, and lets an operator inspect or force the live circuit-breaker
//! state on any instance.
//!
//! ## Overview
//!
//! Reads flow discovery-first: the instances backing a service are asked for
//! their live property keys, the store supplies whatever configuration has
//! been committed, library defaults fill the gaps, and explicit ordering is
//! applied at the edge. Writes are a two-step commit: an append-only history
//! row, then the current-snapshot upsert — best-effort by design, with no
//! distributed transaction underneath.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fusegate::{Fusegate, ServiceId, DependencyId, TenacityConfiguration};
//!
//! #[tokio::main]
//! async fn main() -> fusegate::Result<()> {
//!     let gate = Fusegate::builder().build()?;
//!
//!     let service = ServiceId::new("checkout")?;
//!     let dependency = DependencyId::new("inventory-api")?;
//!
//!     let committed = gate
//!         .configure(&service, &dependency, TenacityConfiguration::default(), Some("alice"))
//!         .await?;
//!     assert!(committed);
//!
//!     let resolution = gate.resolve(&service, &dependency).await?;
//!     println!("effective: {:?}", resolution.configuration);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | Identifiers, configuration, stored entities, breaker state |
//! | [`client`] | Instance control capability trait and its HTTP adapter |
//! | [`discovery`] | Instance directory and fleet-wide property-key discovery |
//! | [`store`] | Entity-store trait and in-memory reference store |
//! | [`commit`] | Two-step configuration commit |
//! | [`resolver`] | Store lookup + defaulting + ordering |
//! | [`ordering`] | Deterministic presentation-time comparators |
//! | [`service`] | The [`Fusegate`] facade and its builder |

pub mod client;
pub mod commit;
pub mod discovery;
pub mod ordering;
pub mod resolver;
pub mod service;
pub mod store;
pub mod types;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;

// Re-export main types for convenience
pub use client::{HttpInstanceClient, HttpInstanceClientConfig, InstanceControlClient};
pub use commit::{CommitCoordinator, UNKNOWN_USER};
pub use discovery::{InstanceDirectory, PropertyKeyDiscovery, StaticDirectory};
pub use resolver::{ConfigResolver, DefaultResolution, Resolution};
pub use service::{Fusegate, FusegateBuilder};
pub use store::{ConfigStore, MemoryStore};
pub use types::{
    CircuitBreakerConfiguration, CircuitBreakerState, CircuitBreakerStatus, DependencyEntity,
    DependencyId, Instance, ServiceEntity, ServiceId, TenacityConfiguration,
    ThreadPoolConfiguration,
};
