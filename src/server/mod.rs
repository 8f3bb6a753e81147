//! Game Server
//!
//! A minimal server that owns everything `ServerAccess` exposes: the level
//! table, background workers, storage, world data and the event bus. Its
//! tick loop walks a cached level enumeration, so a level only ticks once
//! the cache has been invalidated after it was added.

use crate::config::DimensionsConfig;
use crate::error::DimensionResult;
use crate::events::{EventBus, LevelEvent};
use crate::host::{
    ChunkProgressListenerFactory, LevelStorageSource, LevelTable, Lifecycle,
    LoggingProgressListenerFactory, ServerAccess, ServerConfiguration, WorldGenSettings,
};
use crate::thread_pool::{create_worker_pool, WorkerPoolData};
use crate::world::core::{BlockPos, ResourceLocation, WorldKey};
use crate::world::level::{
    ChunkGenerator, DimensionType, GeneratorKind, LevelData, LevelInit, LevelProperties,
    LevelStem, ServerLevel,
};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Settings a server is started with
pub struct GameServerConfig {
    pub dimensions: DimensionsConfig,
    pub storage_root: PathBuf,
    pub level_name: String,
    pub seed: i64,
    pub is_debug: bool,
    pub spawn: BlockPos,
}

impl Default for GameServerConfig {
    fn default() -> Self {
        Self {
            dimensions: DimensionsConfig::default(),
            storage_root: PathBuf::from("world"),
            level_name: "world".to_string(),
            seed: 0,
            is_debug: false,
            spawn: BlockPos::new(0, 64, 0),
        }
    }
}

pub struct GameServer {
    config: DimensionsConfig,
    levels: LevelTable,
    executor: WorkerPoolData,
    storage: LevelStorageSource,
    progress_factory: Box<dyn ChunkProgressListenerFactory>,
    world_data: ServerConfiguration,
    event_bus: EventBus,
    /// Enumeration the tick loop walks; `None` once marked dirty
    level_cache: RwLock<Option<Arc<[Arc<ServerLevel>]>>>,
    dirty_marks: AtomicU64,
    tick_count: AtomicU64,
}

impl GameServer {
    /// Create a server without any level loaded
    pub fn new(config: GameServerConfig) -> DimensionResult<Self> {
        let executor = create_worker_pool(config.dimensions.workers.clone())?;
        let world_data = ServerConfiguration::new(
            WorldGenSettings::new(config.seed, config.is_debug),
            LevelProperties::new(&config.level_name, config.spawn),
        );

        log::info!(
            "[GameServer::new] Server '{}' created with storage at {}",
            config.level_name,
            config.storage_root.display()
        );

        Ok(Self {
            config: config.dimensions,
            levels: LevelTable::new(),
            executor,
            storage: LevelStorageSource::new(config.storage_root),
            progress_factory: Box::new(LoggingProgressListenerFactory),
            world_data,
            event_bus: EventBus::new(),
            level_cache: RwLock::new(None),
            dirty_marks: AtomicU64::new(0),
            tick_count: AtomicU64::new(0),
        })
    }

    /// Create a server and load its overworld
    pub fn with_overworld(config: GameServerConfig) -> DimensionResult<Arc<Self>> {
        let server = Arc::new(Self::new(config)?);
        server.bootstrap_overworld(default_overworld_stem())?;
        Ok(server)
    }

    /// Replace the progress listener factory used for new levels
    pub fn set_progress_listener_factory(&mut self, factory: Box<dyn ChunkProgressListenerFactory>) {
        self.progress_factory = factory;
    }

    /// Load the primary level. Follows the same order as runtime
    /// registration minus the border link, since the overworld owns the
    /// border every other level follows.
    pub fn bootstrap_overworld(&self, stem: LevelStem) -> DimensionResult<Arc<ServerLevel>> {
        let key = WorldKey::overworld();
        self.world_data
            .register_stem(key.stem_key(), stem.clone(), Lifecycle::Stable)?;

        let level = ServerLevel::new(LevelInit {
            key: key.clone(),
            stem,
            level_data: LevelData::Primary(self.world_data.overworld_data()),
            progress: self
                .progress_factory
                .create(self.config.registry.progress_listener_radius),
            storage_dir: self.storage.dimension_path(&key),
            is_debug: self.world_data.is_debug(),
            seed: self.world_data.seed(),
            tick_time: true,
        });
        let level = match level {
            Ok(level) => Arc::new(level),
            Err(e) => {
                self.world_data.unregister_stem(&key.stem_key());
                return Err(e);
            }
        };

        if let Err(e) = self.levels.insert_new(Arc::clone(&level)) {
            self.world_data.unregister_stem(&key.stem_key());
            return Err(e);
        }
        self.mark_worlds_dirty();
        level.mark_published();
        self.event_bus.post(LevelEvent::load(Arc::clone(&level)));

        log::info!("[GameServer::bootstrap_overworld] Overworld loaded");
        Ok(level)
    }

    pub fn overworld(&self) -> Option<Arc<ServerLevel>> {
        self.levels.get(&WorldKey::overworld())
    }

    pub fn config(&self) -> &DimensionsConfig {
        &self.config
    }

    /// Levels the tick loop currently walks
    pub fn cached_levels(&self) -> Arc<[Arc<ServerLevel>]> {
        if let Some(levels) = self.level_cache.read().as_ref() {
            return Arc::clone(levels);
        }

        let mut cache = self.level_cache.write();
        let levels = cache.get_or_insert_with(|| {
            log::trace!("[GameServer::cached_levels] Rebuilding level enumeration");
            self.levels.levels().into()
        });
        Arc::clone(levels)
    }

    /// Advance every enumerated level by one tick
    pub fn tick(&self) {
        for level in self.cached_levels().iter() {
            level.tick();
        }
        self.tick_count.fetch_add(1, Ordering::AcqRel);
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Acquire)
    }

    pub fn dirty_mark_count(&self) -> u64 {
        self.dirty_marks.load(Ordering::Acquire)
    }
}

impl ServerAccess for GameServer {
    fn levels(&self) -> &LevelTable {
        &self.levels
    }

    fn background_executor(&self) -> &WorkerPoolData {
        &self.executor
    }

    fn storage_source(&self) -> &LevelStorageSource {
        &self.storage
    }

    fn progress_listener_factory(&self) -> &dyn ChunkProgressListenerFactory {
        self.progress_factory.as_ref()
    }

    fn world_data(&self) -> &ServerConfiguration {
        &self.world_data
    }

    fn mark_worlds_dirty(&self) {
        *self.level_cache.write() = None;
        self.dirty_marks.fetch_add(1, Ordering::AcqRel);
    }

    fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}

/// Noise-generated overworld stem
pub fn default_overworld_stem() -> LevelStem {
    LevelStem::new(
        DimensionType::overworld(),
        ChunkGenerator {
            kind: GeneratorKind::Noise {
                settings: ResourceLocation::vanilla("overworld"),
            },
            biome_source: ResourceLocation::vanilla("multi_noise"),
        },
    )
}
