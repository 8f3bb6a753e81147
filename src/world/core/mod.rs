//! Core world data types
//!
//! Identifiers and coordinates shared by the registry, the host model and
//! player transfer.

mod key;
mod position;

pub use key::{ResourceLocation, StemKey, WorldKey};
pub use position::{BlockPos, ChunkPos};
