//! Live circuit-breaker state as reported by a running instance.

use serde::{Deserialize, Serialize};

/// State of the protective state machine guarding one dependency call path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CircuitBreakerState {
    Open,
    Closed,
    HalfOpen,
}

impl CircuitBreakerState {
    /// Wire form used by the instance management protocol.
    pub fn as_str(&self) -> &'static str {
        match self {
            CircuitBreakerState::Open => "OPEN",
            CircuitBreakerState::Closed => "CLOSED",
            CircuitBreakerState::HalfOpen => "HALF_OPEN",
        }
    }
}

impl std::str::FromStr for CircuitBreakerState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OPEN" => Ok(CircuitBreakerState::Open),
            "CLOSED" => Ok(CircuitBreakerState::Closed),
            "HALF_OPEN" => Ok(CircuitBreakerState::HalfOpen),
            other => Err(format!("unknown circuit breaker state: {other}")),
        }
    }
}

/// Snapshot of one circuit breaker on one instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitBreakerStatus {
    /// The property key the instance uses for this call path.
    pub name: String,
    pub state: CircuitBreakerState,
}
