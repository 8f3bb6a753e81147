//! Level Data - properties a level reads its spawn and clock from
//!
//! The overworld owns its `LevelProperties`. Every level created at runtime
//! gets a `DerivedLevelData` view over the overworld's properties, so all
//! levels share one clock and spawn. Writes through a derived view are ignored.

use crate::world::core::BlockPos;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Mutable properties of the primary level
#[derive(Debug)]
pub struct LevelProperties {
    pub level_name: String,
    pub hardcore: bool,
    spawn: RwLock<BlockPos>,
    game_time: AtomicI64,
    day_time: AtomicI64,
}

impl LevelProperties {
    pub fn new(level_name: &str, spawn: BlockPos) -> Self {
        Self {
            level_name: level_name.to_string(),
            hardcore: false,
            spawn: RwLock::new(spawn),
            game_time: AtomicI64::new(0),
            day_time: AtomicI64::new(0),
        }
    }

    pub fn spawn(&self) -> BlockPos {
        *self.spawn.read()
    }

    pub fn set_spawn(&self, spawn: BlockPos) {
        *self.spawn.write() = spawn;
    }

    pub fn game_time(&self) -> i64 {
        self.game_time.load(Ordering::Acquire)
    }

    pub fn day_time(&self) -> i64 {
        self.day_time.load(Ordering::Acquire)
    }

    pub fn advance_time(&self, fixed_time: Option<i64>) {
        self.game_time.fetch_add(1, Ordering::AcqRel);
        match fixed_time {
            Some(time) => self.day_time.store(time, Ordering::Release),
            None => {
                self.day_time.fetch_add(1, Ordering::AcqRel);
            }
        }
    }
}

/// Read-only view of the overworld's properties
#[derive(Debug, Clone)]
pub struct DerivedLevelData {
    overworld: Arc<LevelProperties>,
}

impl DerivedLevelData {
    pub fn new(overworld: Arc<LevelProperties>) -> Self {
        Self { overworld }
    }

    pub fn level_name(&self) -> &str {
        &self.overworld.level_name
    }

    pub fn spawn(&self) -> BlockPos {
        self.overworld.spawn()
    }

    pub fn game_time(&self) -> i64 {
        self.overworld.game_time()
    }

    pub fn day_time(&self) -> i64 {
        self.overworld.day_time()
    }

    /// Derived levels never move the shared spawn
    pub fn set_spawn(&self, spawn: BlockPos) {
        log::trace!(
            "[DerivedLevelData::set_spawn] Ignoring spawn {:?} for derived level of '{}'",
            spawn,
            self.overworld.level_name
        );
    }
}

/// Properties backing a level
#[derive(Debug, Clone)]
pub enum LevelData {
    Primary(Arc<LevelProperties>),
    Derived(DerivedLevelData),
}

impl LevelData {
    pub fn spawn(&self) -> BlockPos {
        match self {
            LevelData::Primary(properties) => properties.spawn(),
            LevelData::Derived(derived) => derived.spawn(),
        }
    }

    pub fn set_spawn(&self, spawn: BlockPos) {
        match self {
            LevelData::Primary(properties) => properties.set_spawn(spawn),
            LevelData::Derived(derived) => derived.set_spawn(spawn),
        }
    }

    pub fn game_time(&self) -> i64 {
        match self {
            LevelData::Primary(properties) => properties.game_time(),
            LevelData::Derived(derived) => derived.game_time(),
        }
    }

    pub fn day_time(&self) -> i64 {
        match self {
            LevelData::Primary(properties) => properties.day_time(),
            LevelData::Derived(derived) => derived.day_time(),
        }
    }

    /// Advance the clock. Only primary data owns a clock to advance.
    pub fn advance_time(&self, fixed_time: Option<i64>) {
        if let LevelData::Primary(properties) = self {
            properties.advance_time(fixed_time);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_data_follows_overworld() {
        let properties = Arc::new(LevelProperties::new("world", BlockPos::new(0, 64, 0)));
        let derived = LevelData::Derived(DerivedLevelData::new(Arc::clone(&properties)));

        properties.advance_time(None);
        properties.set_spawn(BlockPos::new(10, 70, 10));

        assert_eq!(derived.game_time(), 1);
        assert_eq!(derived.spawn(), BlockPos::new(10, 70, 10));
    }

    #[test]
    fn test_derived_data_is_read_only() {
        let properties = Arc::new(LevelProperties::new("world", BlockPos::new(0, 64, 0)));
        let derived = LevelData::Derived(DerivedLevelData::new(Arc::clone(&properties)));

        derived.set_spawn(BlockPos::new(99, 99, 99));
        derived.advance_time(None);

        assert_eq!(properties.spawn(), BlockPos::new(0, 64, 0));
        assert_eq!(properties.game_time(), 0);
    }

    #[test]
    fn test_fixed_time_pins_day_time() {
        let properties = LevelProperties::new("world", BlockPos::default());
        properties.advance_time(Some(6000));
        properties.advance_time(Some(6000));
        assert_eq!(properties.game_time(), 2);
        assert_eq!(properties.day_time(), 6000);
    }
}
