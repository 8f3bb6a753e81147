//! World-generation settings and the server configuration that holds them

use crate::error::{DimensionError, DimensionResult};
use crate::world::core::StemKey;
use crate::world::level::{LevelProperties, LevelStem};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Stability of a registry entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    Stable,
    Experimental,
    Deprecated,
}

/// Seed, debug flag and the registered level stems
#[derive(Debug, Clone)]
pub struct WorldGenSettings {
    pub seed: i64,
    pub is_debug: bool,
    stems: BTreeMap<StemKey, (LevelStem, Lifecycle)>,
}

impl WorldGenSettings {
    pub fn new(seed: i64, is_debug: bool) -> Self {
        Self {
            seed,
            is_debug,
            stems: BTreeMap::new(),
        }
    }

    /// Register a stem under a key that has none yet
    pub fn register_stem(
        &mut self,
        key: StemKey,
        stem: LevelStem,
        lifecycle: Lifecycle,
    ) -> DimensionResult<()> {
        if self.stems.contains_key(&key) {
            return Err(DimensionError::StemRegistration {
                key: key.to_string(),
                reason: "a stem is already registered under this key".to_string(),
            });
        }
        self.stems.insert(key, (stem, lifecycle));
        Ok(())
    }

    pub fn unregister_stem(&mut self, key: &StemKey) -> Option<LevelStem> {
        self.stems.remove(key).map(|(stem, _)| stem)
    }

    pub fn stem(&self, key: &StemKey) -> Option<&LevelStem> {
        self.stems.get(key).map(|(stem, _)| stem)
    }

    pub fn lifecycle(&self, key: &StemKey) -> Option<Lifecycle> {
        self.stems.get(key).map(|(_, lifecycle)| *lifecycle)
    }

    pub fn stem_keys(&self) -> Vec<StemKey> {
        self.stems.keys().cloned().collect()
    }
}

/// Server-wide world data
#[derive(Debug)]
pub struct ServerConfiguration {
    world_gen: RwLock<WorldGenSettings>,
    overworld_data: Arc<LevelProperties>,
}

impl ServerConfiguration {
    pub fn new(world_gen: WorldGenSettings, overworld_data: LevelProperties) -> Self {
        Self {
            world_gen: RwLock::new(world_gen),
            overworld_data: Arc::new(overworld_data),
        }
    }

    pub fn overworld_data(&self) -> Arc<LevelProperties> {
        Arc::clone(&self.overworld_data)
    }

    pub fn seed(&self) -> i64 {
        self.world_gen.read().seed
    }

    pub fn is_debug(&self) -> bool {
        self.world_gen.read().is_debug
    }

    pub fn register_stem(
        &self,
        key: StemKey,
        stem: LevelStem,
        lifecycle: Lifecycle,
    ) -> DimensionResult<()> {
        self.world_gen.write().register_stem(key, stem, lifecycle)
    }

    pub fn unregister_stem(&self, key: &StemKey) -> Option<LevelStem> {
        self.world_gen.write().unregister_stem(key)
    }

    pub fn has_stem(&self, key: &StemKey) -> bool {
        self.world_gen.read().stem(key).is_some()
    }

    pub fn stem_lifecycle(&self, key: &StemKey) -> Option<Lifecycle> {
        self.world_gen.read().lifecycle(key)
    }

    /// Copy of the current settings
    pub fn world_gen_settings(&self) -> WorldGenSettings {
        self.world_gen.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::core::WorldKey;
    use crate::world::level::{ChunkGenerator, DimensionType};

    fn void_stem() -> LevelStem {
        LevelStem::new(
            DimensionType::overworld(),
            ChunkGenerator::void("minecraft:the_void".parse().expect("valid key")),
        )
    }

    #[test]
    fn test_register_and_unregister_stem() {
        let mut settings = WorldGenSettings::new(7, false);
        let key = "test:void".parse::<WorldKey>().expect("valid key").stem_key();

        settings
            .register_stem(key.clone(), void_stem(), Lifecycle::Experimental)
            .expect("first registration");
        assert_eq!(settings.lifecycle(&key), Some(Lifecycle::Experimental));

        assert!(settings.unregister_stem(&key).is_some());
        assert!(settings.stem(&key).is_none());
    }

    #[test]
    fn test_duplicate_stem_rejected() {
        let mut settings = WorldGenSettings::new(7, false);
        let key = "test:void".parse::<WorldKey>().expect("valid key").stem_key();

        settings
            .register_stem(key.clone(), void_stem(), Lifecycle::Stable)
            .expect("first registration");
        let second = settings.register_stem(key.clone(), void_stem(), Lifecycle::Experimental);

        assert!(matches!(second, Err(DimensionError::StemRegistration { .. })));
        assert_eq!(settings.lifecycle(&key), Some(Lifecycle::Stable));
    }
}
