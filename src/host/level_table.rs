//! The server's canonical level table
//!
//! Appended to only by level registration. Removal exists solely so a
//! failed registration can be undone.

use crate::error::{DimensionError, DimensionResult};
use crate::world::core::WorldKey;
use crate::world::level::ServerLevel;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

#[derive(Default)]
pub struct LevelTable {
    levels: RwLock<FxHashMap<WorldKey, Arc<ServerLevel>>>,
}

impl LevelTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &WorldKey) -> Option<Arc<ServerLevel>> {
        self.levels.read().get(key).cloned()
    }

    pub fn contains(&self, key: &WorldKey) -> bool {
        self.levels.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.levels.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.read().is_empty()
    }

    /// Keys in sorted order
    pub fn keys(&self) -> Vec<WorldKey> {
        let mut keys: Vec<WorldKey> = self.levels.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// All levels, sorted by key
    pub fn levels(&self) -> Vec<Arc<ServerLevel>> {
        let mut levels: Vec<Arc<ServerLevel>> = self.levels.read().values().cloned().collect();
        levels.sort_by(|a, b| a.key().cmp(b.key()));
        levels
    }

    /// Insert a level whose key must not be present yet
    pub(crate) fn insert_new(&self, level: Arc<ServerLevel>) -> DimensionResult<()> {
        match self.levels.write().entry(level.key().clone()) {
            Entry::Occupied(entry) => Err(DimensionError::ConcurrentCreationConflict {
                key: entry.key().to_string(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(level);
                Ok(())
            }
        }
    }

    pub(crate) fn remove(&self, key: &WorldKey) -> Option<Arc<ServerLevel>> {
        self.levels.write().remove(key)
    }
}

impl std::fmt::Debug for LevelTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelTable")
            .field("keys", &self.keys())
            .finish()
    }
}
