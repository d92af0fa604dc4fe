use thiserror::Error;

/// Unified error type for fusegate.
///
/// This aggregates store, transport, and validation failures into actionable,
/// high-level categories. "Absent" results (a reachable instance that does not
/// know a key, a pair with no stored configuration on the view path) are NOT
/// errors — they come back as `Option`/defaults. The variants here are the
/// cases a caller must branch on.
#[derive(Debug, Error)]
pub enum Error {
    /// Empty or whitespace-only identifier, rejected before any store or
    /// network call.
    #[error("invalid {what}: {value:?} (must be non-empty)")]
    InvalidIdentifier { what: &'static str, value: String },

    /// No stored configuration exists for the pair on the data-fetch path.
    /// The view-rendering path defaults instead; this path must not.
    #[error("no stored configuration for service {service}, dependency {dependency}")]
    NotFound { service: String, dependency: String },

    /// A single instance failed to respond. Discovery excludes the instance
    /// from aggregates; single-instance control calls surface this directly
    /// so callers can tell "unreachable" apart from "not configured".
    #[error("instance {instance} unreachable: {source}")]
    InstanceUnreachable {
        instance: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP-level transport failure that is not attributable to one instance
    /// being down (body decode, protocol violation).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// An instance answered with a status the management protocol does not
    /// define for the request.
    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// Entity store fault (distinct from the store *declining* a write, which
    /// is reported as a boolean).
    #[error("store error: {0}")]
    Store(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a store fault from any displayable cause.
    pub fn store(msg: impl Into<String>) -> Self {
        Error::Store(msg.into())
    }

    /// True when the failure means one instance could not be reached, as
    /// opposed to a reachable instance giving a bad answer.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Error::InstanceUnreachable { .. })
    }
}
