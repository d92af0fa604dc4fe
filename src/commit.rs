//! Two-step configuration commit.
//!
//! A configuration write is two dependent store operations: append a history
//! row, then upsert the current snapshot. There is no transaction and no
//! rollback — history rows are append-only by invariant, so a failed second
//! step leaves an orphaned history row behind. The coordinator reports
//! failure to the caller and logs the divergence so operators can reconcile.

use crate::store::ConfigStore;
use crate::types::{DependencyEntity, DependencyId, ServiceEntity, ServiceId, TenacityConfiguration};
use crate::Result;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Substituted when the caller's identity cannot be resolved. History rows
/// never carry an empty author.
pub const UNKNOWN_USER: &str = "unknown_user";

pub struct CommitCoordinator {
    store: Arc<dyn ConfigStore>,
}

impl CommitCoordinator {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// Record a configuration change: history append, then snapshot upsert.
    ///
    /// Returns `Ok(true)` only when both store operations report success.
    /// Concurrent writers to the same pair are not serialized; the last
    /// upsert wins the snapshot while every write lands in history.
    pub async fn configure(
        &self,
        service: &ServiceId,
        dependency: &DependencyId,
        configuration: TenacityConfiguration,
        username: Option<&str>,
    ) -> Result<bool> {
        let authored_by = match username {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => {
                tracing::warn!(
                    service = %service,
                    dependency = %dependency,
                    "unable to resolve username while submitting configuration"
                );
                UNKNOWN_USER.to_string()
            }
        };

        let history_row = DependencyEntity {
            dependency_id: dependency.clone(),
            timestamp_millis: now_millis(),
            configuration: configuration.clone(),
            authored_by,
        };

        let history_ok = self.store.store_dependency_entity(history_row).await?;
        if !history_ok {
            tracing::warn!(
                service = %service,
                dependency = %dependency,
                "store declined history append; configuration not committed"
            );
            return Ok(false);
        }

        let snapshot = ServiceEntity::with_configuration(
            service.clone(),
            dependency.clone(),
            configuration,
        );
        let snapshot_ok = self.store.store_service_entity(snapshot).await?;
        if !snapshot_ok {
            // History already has the row; the snapshot pointer is now stale.
            tracing::warn!(
                service = %service,
                dependency = %dependency,
                "snapshot upsert failed after history append; stored state diverged"
            );
        }
        Ok(snapshot_ok)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
