use super::border::WorldBorder;
use super::chunk_source::{ChunkSource, LevelChunk};
use super::level_data::LevelData;
use super::stem::{DimensionType, LevelStem};
use crate::error::{DimensionError, DimensionResult};
use crate::host::progress::ChunkProgressListener;
use crate::world::core::{BlockPos, ChunkPos, WorldKey};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

/// Registration lifecycle of a level
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelState {
    /// Built, but its creation side effects have not all run
    Constructed = 0,
    /// Border linked, in the level table, enumerated, load event fired
    Published = 1,
}

/// Everything needed to instantiate a level
pub struct LevelInit {
    pub key: WorldKey,
    pub stem: LevelStem,
    pub level_data: LevelData,
    pub progress: Box<dyn ChunkProgressListener>,
    pub storage_dir: PathBuf,
    pub is_debug: bool,
    pub seed: i64,
    /// Whether ticking this level advances the shared clock.
    /// True for the overworld, false for everything else.
    pub tick_time: bool,
}

/// A loaded level (dimension instance)
pub struct ServerLevel {
    key: WorldKey,
    dimension_type: DimensionType,
    level_data: LevelData,
    border: Arc<WorldBorder>,
    chunk_source: ChunkSource,
    storage_dir: PathBuf,
    is_debug: bool,
    seed: i64,
    tick_time: bool,
    state: AtomicU8,
    tick_count: AtomicU64,
}

impl ServerLevel {
    pub fn new(init: LevelInit) -> DimensionResult<Self> {
        init.stem
            .dimension_type
            .validate()
            .map_err(|reason| DimensionError::InvalidDimensionType {
                key: init.key.to_string(),
                reason,
            })?;

        init.progress
            .update_spawn_position(init.level_data.spawn().chunk_pos());
        init.progress.start();

        let chunk_source = ChunkSource::new(init.key.to_string(), init.stem.generator, init.progress);

        Ok(Self {
            key: init.key,
            dimension_type: init.stem.dimension_type,
            level_data: init.level_data,
            border: Arc::new(WorldBorder::new()),
            chunk_source,
            storage_dir: init.storage_dir,
            is_debug: init.is_debug,
            seed: init.seed,
            tick_time: init.tick_time,
            state: AtomicU8::new(LevelState::Constructed as u8),
            tick_count: AtomicU64::new(0),
        })
    }

    pub fn key(&self) -> &WorldKey {
        &self.key
    }

    pub fn dimension_type(&self) -> &DimensionType {
        &self.dimension_type
    }

    pub fn level_data(&self) -> &LevelData {
        &self.level_data
    }

    pub fn world_border(&self) -> &Arc<WorldBorder> {
        &self.border
    }

    pub fn chunk_source(&self) -> &ChunkSource {
        &self.chunk_source
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn is_debug(&self) -> bool {
        self.is_debug
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn ticks_time(&self) -> bool {
        self.tick_time
    }

    /// Load the chunk containing `pos` if it is not resident yet
    pub fn get_chunk_at(&self, pos: BlockPos) -> DimensionResult<Arc<LevelChunk>> {
        self.get_chunk(pos.chunk_pos())
    }

    pub fn get_chunk(&self, pos: ChunkPos) -> DimensionResult<Arc<LevelChunk>> {
        Ok(self.chunk_source.get_chunk(pos)?)
    }

    pub fn state(&self) -> LevelState {
        match self.state.load(Ordering::Acquire) {
            0 => LevelState::Constructed,
            _ => LevelState::Published,
        }
    }

    pub fn is_published(&self) -> bool {
        self.state() == LevelState::Published
    }

    pub(crate) fn mark_published(&self) {
        self.state
            .store(LevelState::Published as u8, Ordering::Release);
    }

    /// Back to `Constructed` when registration is reverted
    pub(crate) fn mark_constructed(&self) {
        self.state
            .store(LevelState::Constructed as u8, Ordering::Release);
    }

    pub fn tick(&self) {
        self.tick_count.fetch_add(1, Ordering::AcqRel);
        if self.tick_time {
            self.level_data
                .advance_time(self.dimension_type.fixed_time);
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Acquire)
    }

    pub fn game_time(&self) -> i64 {
        self.level_data.game_time()
    }

    pub fn day_time(&self) -> i64 {
        self.level_data.day_time()
    }
}

impl std::fmt::Debug for ServerLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerLevel")
            .field("key", &self.key)
            .field("state", &self.state())
            .field("tick_time", &self.tick_time)
            .field("loaded_chunks", &self.chunk_source.loaded_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::progress::LoggingProgressListener;
    use crate::world::level::level_data::{DerivedLevelData, LevelProperties};
    use crate::world::level::stem::ChunkGenerator;

    fn create_test_init(stem: LevelStem, properties: Arc<LevelProperties>) -> LevelInit {
        LevelInit {
            key: "test:void".parse().expect("valid key"),
            stem,
            level_data: LevelData::Derived(DerivedLevelData::new(properties)),
            progress: Box::new(LoggingProgressListener::new(11)),
            storage_dir: PathBuf::from("dimensions/test/void"),
            is_debug: false,
            seed: 42,
            tick_time: false,
        }
    }

    fn void_stem(dimension_type: DimensionType) -> LevelStem {
        LevelStem::new(
            dimension_type,
            ChunkGenerator::void("minecraft:the_void".parse().expect("valid key")),
        )
    }

    #[test]
    fn test_new_level_starts_constructed() {
        let properties = Arc::new(LevelProperties::new("world", BlockPos::new(0, 64, 0)));
        let level = ServerLevel::new(create_test_init(
            void_stem(DimensionType::overworld()),
            properties,
        ))
        .expect("valid level");

        assert_eq!(level.state(), LevelState::Constructed);
        level.mark_published();
        assert!(level.is_published());
        level.mark_constructed();
        assert_eq!(level.state(), LevelState::Constructed);
    }

    #[test]
    fn test_invalid_dimension_type_rejected() {
        let properties = Arc::new(LevelProperties::new("world", BlockPos::default()));
        let broken = DimensionType {
            height: 0,
            ..DimensionType::overworld()
        };
        let result = ServerLevel::new(create_test_init(void_stem(broken), properties));

        assert!(matches!(
            result,
            Err(DimensionError::InvalidDimensionType { .. })
        ));
    }

    #[test]
    fn test_derived_level_does_not_advance_clock() {
        let properties = Arc::new(LevelProperties::new("world", BlockPos::default()));
        let level = ServerLevel::new(create_test_init(
            void_stem(DimensionType::overworld()),
            Arc::clone(&properties),
        ))
        .expect("valid level");

        level.tick();
        level.tick();

        assert_eq!(level.tick_count(), 2);
        assert_eq!(properties.game_time(), 0);
    }
}
