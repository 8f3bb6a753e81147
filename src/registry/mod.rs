//! Runtime dimension registry
//!
//! `DimensionRegistry` adds levels to a running server on demand. A level
//! created here is indistinguishable from one loaded at startup: it follows
//! the overworld's border, shares its clock, ticks with the server and is
//! announced on the event bus.

pub mod registry_data;
pub mod registry_operations;
pub mod side_effects;

pub use registry_data::{DimensionRegistryData, RegistryStats};
pub use side_effects::{ChainFailure, ChainReport, CreationStep, CREATION_ORDER};

use crate::config::RegistryConfig;
use crate::error::DimensionResult;
use crate::host::ServerAccess;
use crate::world::core::{StemKey, WorldKey};
use crate::world::level::{LevelStem, ServerLevel};
use std::sync::Arc;

/// Get-or-create access to a server's levels
pub struct DimensionRegistry {
    data: DimensionRegistryData,
}

impl DimensionRegistry {
    pub fn new(server: Arc<dyn ServerAccess>, config: RegistryConfig) -> Self {
        Self {
            data: registry_operations::create_registry_data(server, config),
        }
    }

    /// See [`registry_operations::get_or_create_level`]
    pub fn get_or_create<F>(&self, key: &WorldKey, factory: F) -> DimensionResult<Arc<ServerLevel>>
    where
        F: FnOnce(&dyn ServerAccess, &StemKey) -> anyhow::Result<LevelStem> + Send + 'static,
    {
        registry_operations::get_or_create_level(&self.data, key, factory)
    }

    /// Parse `key` and get or create the level
    pub fn get_or_create_by_name<F>(&self, key: &str, factory: F) -> DimensionResult<Arc<ServerLevel>>
    where
        F: FnOnce(&dyn ServerAccess, &StemKey) -> anyhow::Result<LevelStem> + Send + 'static,
    {
        let key: WorldKey = key.parse()?;
        self.get_or_create(&key, factory)
    }

    pub fn get_level(&self, key: &WorldKey) -> Option<Arc<ServerLevel>> {
        registry_operations::get_level(&self.data, key)
    }

    pub fn contains(&self, key: &WorldKey) -> bool {
        registry_operations::contains_level(&self.data, key)
    }

    pub fn level_keys(&self) -> Vec<WorldKey> {
        registry_operations::level_keys(&self.data)
    }

    pub fn overworld(&self) -> Option<Arc<ServerLevel>> {
        registry_operations::overworld(&self.data)
    }

    pub fn stats(&self) -> RegistryStats {
        registry_operations::registry_stats(&self.data)
    }

    pub fn server(&self) -> &Arc<dyn ServerAccess> {
        &self.data.server
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.data.config
    }
}
