//! Levels (dimension instances) and the pieces they are assembled from

pub mod border;
pub mod chunk_source;
pub mod level_data;
mod server_level;
pub mod stem;

pub use border::{BorderChange, BorderChangeListener, BorderSettings, DelegateBorderListener, WorldBorder};
pub use chunk_source::{ChunkSource, LevelChunk};
pub use level_data::{DerivedLevelData, LevelData, LevelProperties};
pub use server_level::{LevelInit, LevelState, ServerLevel};
pub use stem::{ChunkGenerator, DimensionType, GeneratorKind, LevelStem};
