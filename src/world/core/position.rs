use crate::constants::core::{CHUNK_SHIFT, WORLD_COORDINATE_LIMIT};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Integer block coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Block containing the given point (floors each axis)
    pub fn containing(point: DVec3) -> Self {
        Self {
            x: point.x.floor() as i32,
            y: point.y.floor() as i32,
            z: point.z.floor() as i32,
        }
    }

    pub fn chunk_pos(&self) -> ChunkPos {
        ChunkPos::new(self.x >> CHUNK_SHIFT, self.z >> CHUNK_SHIFT)
    }
}

/// Horizontal chunk coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Whether every block in this chunk lies inside the world coordinate limit
    pub fn is_within_world(&self) -> bool {
        let limit = WORLD_COORDINATE_LIMIT >> CHUNK_SHIFT;
        (-limit..limit).contains(&self.x) && (-limit..limit).contains(&self.z)
    }

    /// Chebyshev distance, the metric chunk loading radii use
    pub fn distance(&self, other: ChunkPos) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dz = (self.z - other.z).unsigned_abs();
        dx.max(dz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containing_floors_negative_coordinates() {
        let pos = BlockPos::containing(DVec3::new(-0.5, 64.9, 15.99));
        assert_eq!(pos, BlockPos::new(-1, 64, 15));
        assert_eq!(pos.chunk_pos(), ChunkPos::new(-1, 0));
    }

    #[test]
    fn test_world_limit() {
        assert!(ChunkPos::new(0, 0).is_within_world());
        assert!(ChunkPos::new(1_874_999, -1_875_000).is_within_world());
        assert!(!ChunkPos::new(1_875_000, 0).is_within_world());
    }

    #[test]
    fn test_distance() {
        assert_eq!(ChunkPos::new(0, 0).distance(ChunkPos::new(-3, 2)), 3);
    }
}
