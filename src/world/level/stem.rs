//! Level stems: the definition a level is instantiated from
//!
//! A stem pairs a dimension type (vertical bounds, lighting) with the chunk
//! generator used to fill it. Stems are produced by caller-supplied factories
//! and stored in the world-generation settings before the level exists.

use crate::constants::core::{MAX_BUILD_Y, MIN_BUILD_Y, SECTION_HEIGHT};
use crate::world::core::ResourceLocation;
use serde::{Deserialize, Serialize};

/// Physical properties of a dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionType {
    /// Lowest block y; must be a multiple of 16
    pub min_y: i32,
    /// Total build height; must be a positive multiple of 16
    pub height: i32,
    /// Height portals and chorus fruit can reach, at most `height`
    pub logical_height: i32,
    pub has_skylight: bool,
    pub has_ceiling: bool,
    /// Between 0.0 and 1.0
    pub ambient_light: f32,
    /// Locks the day time when set
    pub fixed_time: Option<i64>,
    pub coordinate_scale: f64,
}

impl DimensionType {
    pub fn overworld() -> Self {
        Self {
            min_y: -64,
            height: 384,
            logical_height: 384,
            has_skylight: true,
            has_ceiling: false,
            ambient_light: 0.0,
            fixed_time: None,
            coordinate_scale: 1.0,
        }
    }

    /// Check the bounds a level's chunk sections rely on
    pub fn validate(&self) -> Result<(), String> {
        if self.min_y % SECTION_HEIGHT != 0 {
            return Err(format!("min_y {} is not a multiple of 16", self.min_y));
        }
        if self.height <= 0 || self.height % SECTION_HEIGHT != 0 {
            return Err(format!(
                "height {} must be a positive multiple of 16",
                self.height
            ));
        }
        if self.min_y < MIN_BUILD_Y {
            return Err(format!("min_y {} is below {}", self.min_y, MIN_BUILD_Y));
        }
        if self.min_y + self.height > MAX_BUILD_Y {
            return Err(format!(
                "min_y + height = {} exceeds {}",
                self.min_y + self.height,
                MAX_BUILD_Y
            ));
        }
        if self.logical_height > self.height {
            return Err(format!(
                "logical_height {} exceeds height {}",
                self.logical_height, self.height
            ));
        }
        if !(0.0..=1.0).contains(&self.ambient_light) {
            return Err(format!(
                "ambient_light {} must be between 0.0 and 1.0",
                self.ambient_light
            ));
        }
        Ok(())
    }
}

/// What a chunk generator fills new chunks with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GeneratorKind {
    /// Noise-based terrain driven by a named settings preset
    Noise { settings: ResourceLocation },
    /// Fixed layers of (block, thickness) from the bottom up
    Flat { layers: Vec<(ResourceLocation, u32)> },
    /// Empty chunks
    Void,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkGenerator {
    pub kind: GeneratorKind,
    pub biome_source: ResourceLocation,
}

impl ChunkGenerator {
    pub fn void(biome_source: ResourceLocation) -> Self {
        Self {
            kind: GeneratorKind::Void,
            biome_source,
        }
    }
}

/// Dimension definition a level is built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelStem {
    pub dimension_type: DimensionType,
    pub generator: ChunkGenerator,
}

impl LevelStem {
    pub fn new(dimension_type: DimensionType, generator: ChunkGenerator) -> Self {
        Self {
            dimension_type,
            generator,
        }
    }
}
