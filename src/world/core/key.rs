//! Namespaced identifiers for levels and level stems
//!
//! A level (`WorldKey`) and the stem describing it (`StemKey`) share one
//! `ResourceLocation`; they only differ in which registry they address.

use crate::constants::keys::{DEFAULT_NAMESPACE, OVERWORLD_PATH};
use crate::error::{DimensionError, DimensionResult};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref NAMESPACE_PATTERN: Regex = Regex::new(r"^[a-z0-9_.-]+$").expect("valid regex");
    static ref PATH_PATTERN: Regex = Regex::new(r"^[a-z0-9_./-]+$").expect("valid regex");
}

/// `namespace:path` identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceLocation {
    namespace: String,
    path: String,
}

impl ResourceLocation {
    pub fn new(namespace: &str, path: &str) -> DimensionResult<Self> {
        let full = format!("{}:{}", namespace, path);
        if !NAMESPACE_PATTERN.is_match(namespace) {
            return Err(DimensionError::InvalidKey {
                value: full,
                reason: "namespace must match [a-z0-9_.-]+".to_string(),
            });
        }
        if !PATH_PATTERN.is_match(path) {
            return Err(DimensionError::InvalidKey {
                value: full,
                reason: "path must match [a-z0-9_./-]+".to_string(),
            });
        }
        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Identifier in the default namespace. Only for built-in paths that
    /// are known to be well formed.
    pub(crate) fn vanilla(path: &str) -> Self {
        debug_assert!(PATH_PATTERN.is_match(path));
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            path: path.to_string(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl FromStr for ResourceLocation {
    type Err = DimensionError;

    fn from_str(value: &str) -> DimensionResult<Self> {
        match value.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::new(DEFAULT_NAMESPACE, value),
        }
    }
}

impl TryFrom<String> for ResourceLocation {
    type Error = DimensionError;

    fn try_from(value: String) -> DimensionResult<Self> {
        value.parse()
    }
}

impl From<ResourceLocation> for String {
    fn from(location: ResourceLocation) -> Self {
        location.to_string()
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

/// Key of a level in the server's level table
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorldKey(ResourceLocation);

impl WorldKey {
    pub fn new(location: ResourceLocation) -> Self {
        Self(location)
    }

    /// The bootstrap level every derived level depends on
    pub fn overworld() -> Self {
        Self(ResourceLocation::vanilla(OVERWORLD_PATH))
    }

    pub fn is_overworld(&self) -> bool {
        *self == Self::overworld()
    }

    pub fn location(&self) -> &ResourceLocation {
        &self.0
    }

    /// Stem key with the same location as this level
    pub fn stem_key(&self) -> StemKey {
        StemKey(self.0.clone())
    }
}

impl FromStr for WorldKey {
    type Err = DimensionError;

    fn from_str(value: &str) -> DimensionResult<Self> {
        value.parse().map(Self)
    }
}

impl fmt::Display for WorldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Key of a level stem in the world-generation settings
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StemKey(ResourceLocation);

impl StemKey {
    pub fn location(&self) -> &ResourceLocation {
        &self.0
    }
}

impl fmt::Display for StemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_namespaced() {
        let key: WorldKey = "warden:deep_dark/arena".parse().expect("valid key");
        assert_eq!(key.location().namespace(), "warden");
        assert_eq!(key.location().path(), "deep_dark/arena");
        assert_eq!(key.to_string(), "warden:deep_dark/arena");
    }

    #[test]
    fn test_bare_path_uses_default_namespace() {
        let key: WorldKey = "overworld".parse().expect("valid key");
        assert!(key.is_overworld());
    }

    #[test]
    fn test_rejects_malformed_keys() {
        assert!("Warden:arena".parse::<WorldKey>().is_err());
        assert!("warden:".parse::<WorldKey>().is_err());
        assert!("warden:arena:two".parse::<WorldKey>().is_err());
        assert!("warden:has space".parse::<WorldKey>().is_err());
    }

    #[test]
    fn test_stem_key_shares_location() {
        let key: WorldKey = "warden:arena".parse().expect("valid key");
        assert_eq!(key.stem_key().location(), key.location());
    }

    #[test]
    fn test_serde_as_string() {
        let location: ResourceLocation = "warden:arena".parse().expect("valid key");
        let json = serde_json::to_string(&location).expect("serialize");
        assert_eq!(json, "\"warden:arena\"");
        assert!(serde_json::from_str::<ResourceLocation>("\"Bad:Key\"").is_err());
    }
}
