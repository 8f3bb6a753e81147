//! Host capabilities
//!
//! The narrow slice of server internals that dimension registration needs.
//! Any server that wants runtime dimensions implements `ServerAccess`; the
//! in-crate `GameServer` is one such implementation.

pub mod level_table;
pub mod progress;
pub mod storage;
pub mod world_gen;

pub use level_table::LevelTable;
pub use progress::{
    ChunkProgressListener, ChunkProgressListenerFactory, ChunkStatus, LoggingProgressListener,
    LoggingProgressListenerFactory,
};
pub use storage::LevelStorageSource;
pub use world_gen::{Lifecycle, ServerConfiguration, WorldGenSettings};

use crate::events::EventBus;
use crate::thread_pool::WorkerPoolData;

pub trait ServerAccess: Send + Sync {
    /// Canonical level table
    fn levels(&self) -> &LevelTable;

    /// Pool for construction work that may block on I/O
    fn background_executor(&self) -> &WorkerPoolData;

    fn storage_source(&self) -> &LevelStorageSource;

    fn progress_listener_factory(&self) -> &dyn ChunkProgressListenerFactory;

    fn world_data(&self) -> &ServerConfiguration;

    /// Invalidate every cache that enumerates the server's levels.
    /// Inserting into `levels()` alone does not refresh them.
    fn mark_worlds_dirty(&self);

    fn event_bus(&self) -> &EventBus;
}
