// Hearth Dimensions - runtime dimension registration
//
// Adds levels (dimensions) to a running server on demand and moves players
// between them.
// - registry::DimensionRegistry is the entry point for get-or-create
// - host::ServerAccess is everything the registry needs from a server
// - server::GameServer is a complete in-crate host
//
// For new code, prefer:
// - registry_operations for registry transformations
// - thread_pool_operations for background work
// - Pure functions over methods

// Constants module
pub mod constants;

// Core modules
pub mod config;
pub mod error;
pub mod logging;

// Levels and the server hosting them
pub mod host;
pub mod server;
pub mod world;

// Registration and transfer
pub mod events;
pub mod player;
pub mod registry;
pub mod teleport;

// Utilities
pub mod thread_pool;

pub use config::{DimensionsConfig, RegistryConfig, TeleportConfig};
pub use error::{DimensionError, DimensionResult, ErrorContext, OptionExt};
pub use logging::{init_logging, LoggingConfig};

// === Core Level Types ===
pub use world::core::{BlockPos, ChunkPos, ResourceLocation, StemKey, WorldKey};
pub use world::level::{
    ChunkGenerator, DimensionType, GeneratorKind, LevelStem, ServerLevel, WorldBorder,
};

pub use events::{EventBus, LevelEvent, LevelEventHandler, LevelEventKind};
pub use host::{Lifecycle, ServerAccess};
pub use player::ServerPlayer;
pub use registry::{ChainReport, CreationStep, DimensionRegistry, RegistryStats, CREATION_ORDER};
pub use server::{default_overworld_stem, GameServer, GameServerConfig};
pub use teleport::send_player_to_dimension;

// Re-export glam so callers can build teleport targets
pub use glam::DVec3;
