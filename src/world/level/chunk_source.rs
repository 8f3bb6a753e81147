//! Chunk Source - resident chunks of one level
//!
//! Chunk contents are the generator's concern; the source only tracks which
//! chunks are resident and reports them to the level's progress listener.

use super::stem::ChunkGenerator;
use crate::host::progress::{ChunkProgressListener, ChunkStatus};
use crate::world::core::ChunkPos;
use crate::world::error::{ChunkError, ChunkResult};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

/// A resident chunk
#[derive(Debug)]
pub struct LevelChunk {
    pub pos: ChunkPos,
    pub status: ChunkStatus,
}

pub struct ChunkSource {
    level_name: String,
    generator: ChunkGenerator,
    loaded: RwLock<FxHashMap<ChunkPos, Arc<LevelChunk>>>,
    progress: Box<dyn ChunkProgressListener>,
}

impl ChunkSource {
    pub fn new(
        level_name: String,
        generator: ChunkGenerator,
        progress: Box<dyn ChunkProgressListener>,
    ) -> Self {
        Self {
            level_name,
            generator,
            loaded: RwLock::new(FxHashMap::default()),
            progress,
        }
    }

    pub fn generator(&self) -> &ChunkGenerator {
        &self.generator
    }

    pub fn progress_listener(&self) -> &dyn ChunkProgressListener {
        self.progress.as_ref()
    }

    /// Return the chunk at `pos`, loading it first if needed
    pub fn get_chunk(&self, pos: ChunkPos) -> ChunkResult<Arc<LevelChunk>> {
        if let Some(chunk) = self.loaded.read().get(&pos) {
            return Ok(Arc::clone(chunk));
        }

        if !pos.is_within_world() {
            return Err(ChunkError::OutsideWorld {
                level: self.level_name.clone(),
                pos,
            });
        }

        let chunk = match self.loaded.write().entry(pos) {
            // another caller loaded it between the read and write locks
            Entry::Occupied(entry) => return Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => Arc::clone(entry.insert(Arc::new(LevelChunk {
                pos,
                status: ChunkStatus::Full,
            }))),
        };

        self.progress.on_status_change(pos, ChunkStatus::Full);
        log::trace!(
            "[ChunkSource::get_chunk] Loaded chunk {:?} in {}",
            pos,
            self.level_name
        );
        Ok(chunk)
    }

    pub fn is_loaded(&self, pos: ChunkPos) -> bool {
        self.loaded.read().contains_key(&pos)
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.read().len()
    }
}

impl std::fmt::Debug for ChunkSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkSource")
            .field("level_name", &self.level_name)
            .field("generator", &self.generator)
            .field("loaded", &self.loaded_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::progress::LoggingProgressListener;

    fn create_test_source() -> ChunkSource {
        let biomes = "minecraft:the_void".parse().expect("valid key");
        ChunkSource::new(
            "test:void".to_string(),
            ChunkGenerator::void(biomes),
            Box::new(LoggingProgressListener::new(2)),
        )
    }

    #[test]
    fn test_get_chunk_loads_once() {
        let source = create_test_source();
        let first = source.get_chunk(ChunkPos::new(3, -2)).expect("load chunk");
        let second = source.get_chunk(ChunkPos::new(3, -2)).expect("load chunk");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.loaded_count(), 1);
        assert!(source.is_loaded(ChunkPos::new(3, -2)));
    }

    #[test]
    fn test_chunk_outside_world_rejected() {
        let source = create_test_source();
        let result = source.get_chunk(ChunkPos::new(2_000_000, 0));

        assert!(matches!(result, Err(ChunkError::OutsideWorld { .. })));
        assert_eq!(source.loaded_count(), 0);
    }
}
