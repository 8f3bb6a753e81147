/// World Error Handling
///
/// Chunk-level failures raised by a level's chunk source.
use crate::world::core::ChunkPos;

#[derive(Debug, thiserror::Error)]
pub enum ChunkError {
    #[error("Chunk {pos:?} in {level} lies outside the world coordinate limit")]
    OutsideWorld { level: String, pos: ChunkPos },
}

pub type ChunkResult<T> = Result<T, ChunkError>;
