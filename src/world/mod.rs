//! World Module
//!
//! Identifiers, coordinates and the level model that the dimension registry
//! creates and the teleport operation targets.
//!
//! # Architecture Overview
//!
//! - **Core**: Resource locations, level keys, block and chunk positions
//! - **Level**: `ServerLevel` and its border, chunk source and level data
//! - **Error**: Chunk-level failures

pub mod core;
pub mod error;
pub mod level;

pub use core::{BlockPos, ChunkPos, ResourceLocation, StemKey, WorldKey};
pub use level::{
    ChunkGenerator, DimensionType, GeneratorKind, LevelData, LevelInit, LevelProperties,
    LevelState, LevelStem, ServerLevel, WorldBorder,
};
