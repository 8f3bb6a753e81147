//! Dimension Registry Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in registry_operations.rs

use crate::config::RegistryConfig;
use crate::host::ServerAccess;
use crate::world::core::WorldKey;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

/// Registry state shared by every caller of `get_or_create`
pub struct DimensionRegistryData {
    pub server: Arc<dyn ServerAccess>,
    pub config: RegistryConfig,
    /// One creation lock per key that is being, or failed to be, created.
    /// Entries for successfully created keys are dropped.
    pub creation_locks: DashMap<WorldKey, Arc<Mutex<()>>>,
    pub levels_created: AtomicU64,
    pub cache_hits: AtomicU64,
    pub failed_creations: AtomicU64,
    pub factory_invocations: AtomicU64,
}

/// Counters snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub levels_created: u64,
    /// Calls answered with an already published level
    pub cache_hits: u64,
    pub failed_creations: u64,
    pub factory_invocations: u64,
}
