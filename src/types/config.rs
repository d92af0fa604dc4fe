//! Resilience configuration for one service→dependency call path.
//!
//! Every field group is independently optional: a stored configuration may
//! carry only the values an operator actually set. Defaults are materialized
//! at read time via [`TenacityConfiguration::effective`] and are never
//! written back to the store.

use serde::{Deserialize, Serialize};

/// Thread-pool parameters guarding a dependency call path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ThreadPoolConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_size: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_alive_minutes: Option<i32>,
    /// -1 means a synchronous hand-off queue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_queue_size: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_size_rejection_threshold: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistical_window_ms: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistical_window_buckets: Option<i32>,
}

impl ThreadPoolConfiguration {
    /// Library defaults for every unset field.
    pub fn effective(&self) -> Self {
        Self {
            core_size: Some(self.core_size.unwrap_or(10)),
            keep_alive_minutes: Some(self.keep_alive_minutes.unwrap_or(1)),
            max_queue_size: Some(self.max_queue_size.unwrap_or(-1)),
            queue_size_rejection_threshold: Some(
                self.queue_size_rejection_threshold.unwrap_or(5),
            ),
            statistical_window_ms: Some(self.statistical_window_ms.unwrap_or(10_000)),
            statistical_window_buckets: Some(self.statistical_window_buckets.unwrap_or(10)),
        }
    }
}

/// Circuit-breaker parameters guarding a dependency call path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CircuitBreakerConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_volume_threshold: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_window_ms: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_threshold_percentage: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistical_window_ms: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistical_window_buckets: Option<i32>,
}

impl CircuitBreakerConfiguration {
    pub fn effective(&self) -> Self {
        Self {
            request_volume_threshold: Some(self.request_volume_threshold.unwrap_or(20)),
            sleep_window_ms: Some(self.sleep_window_ms.unwrap_or(5_000)),
            error_threshold_percentage: Some(self.error_threshold_percentage.unwrap_or(50)),
            statistical_window_ms: Some(self.statistical_window_ms.unwrap_or(10_000)),
            statistical_window_buckets: Some(self.statistical_window_buckets.unwrap_or(10)),
        }
    }
}

/// The full resilience configuration for one call path: thread pool,
/// circuit breaker, and execution timeout. Any part may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TenacityConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_pool: Option<ThreadPoolConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_breaker: Option<CircuitBreakerConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_timeout_ms: Option<i32>,
}

impl TenacityConfiguration {
    /// Resolve every unset field group to its library default. Pure: the
    /// stored value is left as-is so defaults never leak into persistence.
    pub fn effective(&self) -> Self {
        Self {
            thread_pool: Some(self.thread_pool.clone().unwrap_or_default().effective()),
            circuit_breaker: Some(
                self.circuit_breaker.clone().unwrap_or_default().effective(),
            ),
            execution_timeout_ms: Some(self.execution_timeout_ms.unwrap_or(1_000)),
        }
    }
}
