//! Configuration persistence.
//!
//! [`ConfigStore`] is the seam to the external entity store. The engine only
//! needs four operations: retrieve a snapshot, list history, append a history
//! row, upsert a snapshot. A write the store *declines* comes back as
//! `Ok(false)`; `Err` is reserved for infrastructure faults.
//!
//! [`MemoryStore`] is the in-process reference implementation, used for tests
//! and single-node deployments.

mod memory;

pub use memory::MemoryStore;

use crate::types::{DependencyEntity, DependencyId, ServiceEntity, ServiceId};
use crate::Result;
use async_trait::async_trait;

/// External entity store holding current snapshots and append-only history.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// The current snapshot for a pair, if one has ever been committed.
    async fn retrieve(
        &self,
        service: &ServiceId,
        dependency: &DependencyId,
    ) -> Result<Option<ServiceEntity>>;

    /// All history rows for a dependency, in no particular order.
    async fn list_dependency_configurations(
        &self,
        dependency: &DependencyId,
    ) -> Result<Vec<DependencyEntity>>;

    /// Append one immutable history row.
    async fn store_dependency_entity(&self, entity: DependencyEntity) -> Result<bool>;

    /// Upsert the current snapshot for the entity's (service, dependency)
    /// pair, replacing any previous row.
    async fn store_service_entity(&self, entity: ServiceEntity) -> Result<bool>;
}
