//! Service and dependency identifiers.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a logical service (an application calling out to
/// dependencies). Non-empty by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(String);

/// Identifier of a named downstream call path from a service. Non-empty by
/// construction. Matches the property key a running instance uses for the
/// same call path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyId(String);

fn validated(what: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidIdentifier {
            what,
            value: value.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

impl ServiceId {
    /// Fails fast on empty input, before any store or network call.
    pub fn new(value: impl AsRef<str>) -> Result<Self> {
        Ok(Self(validated("service id", value.as_ref())?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl DependencyId {
    pub fn new(value: impl AsRef<str>) -> Result<Self> {
        Ok(Self(validated("dependency id", value.as_ref())?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for DependencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ids() {
        assert_eq!(ServiceId::new("checkout").unwrap().as_str(), "checkout");
        assert_eq!(
            DependencyId::new("inventory-api").unwrap().as_str(),
            "inventory-api"
        );
    }

    #[test]
    fn test_empty_id_rejected() {
        assert!(ServiceId::new("").is_err());
        assert!(ServiceId::new("   ").is_err());
        assert!(DependencyId::new("").is_err());
    }

    #[test]
    fn test_id_trimmed() {
        assert_eq!(ServiceId::new(" checkout ").unwrap().as_str(), "checkout");
    }
}
