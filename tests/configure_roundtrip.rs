//! End-to-end configure→resolve behavior against the in-memory store.

use async_trait::async_trait;
use fusegate::{
    CircuitBreakerConfiguration, CircuitBreakerState, CircuitBreakerStatus, DefaultResolution,
    DependencyId, Error, Fusegate, Instance, InstanceControlClient, MemoryStore, Result,
    ServiceId, StaticDirectory, TenacityConfiguration, ThreadPoolConfiguration, UNKNOWN_USER,
};
use std::sync::Arc;

/// Instance client that reports a fixed key set; no network involved.
struct FixedKeysClient {
    keys: Vec<String>,
}

#[async_trait]
impl InstanceControlClient for FixedKeysClient {
    async fn property_keys(&self, _: &Instance) -> Result<Option<Vec<String>>> {
        Ok(Some(self.keys.clone()))
    }

    async fn configuration(&self, _: &Instance, _: &str) -> Result<Option<TenacityConfiguration>> {
        Ok(None)
    }

    async fn circuit_breakers(&self, _: &Instance) -> Result<Option<Vec<CircuitBreakerStatus>>> {
        Ok(None)
    }

    async fn circuit_breaker(&self, _: &Instance, _: &str) -> Result<Option<CircuitBreakerStatus>> {
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

fn gate_with_keys(keys: &[&str]) -> Fusegate {
    let service = ServiceId::new("checkout").unwrap();
    Fusegate::builder()
        .store(Arc::new(MemoryStore::new()))
        .directory(Arc::new(
            StaticDirectory::new().with_service(service, vec![Instance::new("10.0.0.1", 8080)]),
        ))
        .instance_client(Arc::new(FixedKeysClient {
            keys: keys.iter().map(|k| k.to_string()).collect(),
        }))
        .build()
        .unwrap()
}

fn submitted_configuration() -> TenacityConfiguration {
    TenacityConfiguration {
        thread_pool: Some(ThreadPoolConfiguration {
            core_size: Some(10),
            ..Default::default()
        }),
        circuit_breaker: Some(CircuitBreakerConfiguration {
            request_volume_threshold: Some(20),
            sleep_window_ms: Some(5_000),
            error_threshold_percentage: Some(50),
            ..Default::default()
        }),
        execution_timeout_ms: Some(1_000),
    }
}

#[tokio::test]
async fn configure_then_resolve_round_trips_field_by_field() {
    let gate = gate_with_keys(&["inventory-api", "payments"]);
    let service = ServiceId::new("checkout").unwrap();
    let dependency = DependencyId::new("inventory-api").unwrap();
    let submitted = submitted_configuration();

    let committed = gate
        .configure(&service, &dependency, submitted.clone(), Some("alice"))
        .await
        .unwrap();
    assert!(committed);

    let resolution = gate.resolve(&service, &dependency).await.unwrap();

    // Effective form: submitted fields intact, unset fields defaulted.
    let effective = submitted.effective();
    assert_eq!(resolution.configuration, effective);
    assert_eq!(resolution.configuration.execution_timeout_ms, Some(1_000));
    assert_eq!(
        resolution.configuration.thread_pool.as_ref().unwrap().core_size,
        Some(10)
    );

    // History of length 1, authored by alice, carrying the raw submission.
    assert_eq!(resolution.history.len(), 1);
    assert_eq!(resolution.history[0].authored_by, "alice");
    assert_eq!(resolution.history[0].configuration, submitted);

    // Requested dependency heads the ordered key list.
    assert_eq!(resolution.ordered_keys[0], "inventory-api");
}

#[tokio::test]
async fn data_fetch_path_returns_committed_configuration_verbatim() {
    let gate = gate_with_keys(&["inventory-api"]);
    let service = ServiceId::new("checkout").unwrap();
    let dependency = DependencyId::new("inventory-api").unwrap();
    let submitted = submitted_configuration();

    assert!(matches!(
        gate.configuration(&service, &dependency).await,
        Err(Error::NotFound { .. })
    ));

    gate.configure(&service, &dependency, submitted.clone(), Some("alice"))
        .await
        .unwrap();

    // Exactly as committed: no defaults materialized.
    let fetched = gate.configuration(&service, &dependency).await.unwrap();
    assert_eq!(fetched, submitted);
    assert!(fetched.thread_pool.as_ref().unwrap().keep_alive_minutes.is_none());
}

#[tokio::test]
async fn last_writer_wins_snapshot_while_history_keeps_both() {
    let gate = gate_with_keys(&["inventory-api"]);
    let service = ServiceId::new("checkout").unwrap();
    let dependency = DependencyId::new("inventory-api").unwrap();

    let first = TenacityConfiguration {
        execution_timeout_ms: Some(100),
        ..Default::default()
    };
    let second = TenacityConfiguration {
        execution_timeout_ms: Some(200),
        ..Default::default()
    };

    gate.configure(&service, &dependency, first, Some("alice"))
        .await
        .unwrap();
    gate.configure(&service, &dependency, second, Some("bob"))
        .await
        .unwrap();

    let fetched = gate.configuration(&service, &dependency).await.unwrap();
    assert_eq!(fetched.execution_timeout_ms, Some(200));

    let resolution = gate.resolve(&service, &dependency).await.unwrap();
    assert_eq!(resolution.history.len(), 2);
    // Most recent first.
    assert_eq!(resolution.history[0].configuration.execution_timeout_ms, Some(200));
    assert_eq!(resolution.history[1].configuration.execution_timeout_ms, Some(100));
}

#[tokio::test]
async fn empty_username_lands_in_history_as_sentinel() {
    let gate = gate_with_keys(&["inventory-api"]);
    let service = ServiceId::new("checkout").unwrap();
    let dependency = DependencyId::new("inventory-api").unwrap();

    gate.configure(&service, &dependency, TenacityConfiguration::default(), None)
        .await
        .unwrap();

    let resolution = gate.resolve(&service, &dependency).await.unwrap();
    assert_eq!(resolution.history[0].authored_by, UNKNOWN_USER);
}

#[tokio::test]
async fn resolve_default_reports_no_property_keys() {
    let gate = gate_with_keys(&[]);
    let service = ServiceId::new("checkout").unwrap();

    match gate.resolve_default(&service).await.unwrap() {
        DefaultResolution::NoPropertyKeys(reported) => assert_eq!(reported, service),
        DefaultResolution::Resolved(_) => panic!("expected no property keys"),
    }
}

#[tokio::test]
async fn invalid_identifiers_fail_before_any_call() {
    assert!(matches!(
        ServiceId::new(""),
        Err(Error::InvalidIdentifier { .. })
    ));
    assert!(matches!(
        DependencyId::new("  "),
        Err(Error::InvalidIdentifier { .. })
    ));
}
