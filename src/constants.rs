//! Shared constants for dimension creation and teleportation

/// Core world geometry
pub mod core {
    /// Block to chunk coordinate shift (chunks are 16 blocks wide)
    pub const CHUNK_SHIFT: i32 = 4;
    /// Absolute horizontal block coordinate limit
    pub const WORLD_COORDINATE_LIMIT: i32 = 30_000_000;
    /// Vertical bounds a dimension type may occupy
    pub const MIN_BUILD_Y: i32 = -2032;
    pub const MAX_BUILD_Y: i32 = 2032;
    /// Dimension heights and floors must be aligned to a chunk section
    pub const SECTION_HEIGHT: i32 = 16;
}

/// Registry namespaces and bootstrap keys
pub mod keys {
    pub const DEFAULT_NAMESPACE: &str = "minecraft";
    pub const OVERWORLD_PATH: &str = "overworld";
}

/// Defaults used when a level is instantiated at runtime
pub mod level {
    /// Radius of chunks watched by a new level's progress listener.
    /// 11 matches what the server uses for its own initial levels.
    pub const PROGRESS_LISTENER_RADIUS: u32 = 11;
    /// Initial world border diameter in blocks
    pub const DEFAULT_BORDER_SIZE: f64 = 59_999_968.0;
    pub const DEFAULT_BORDER_DAMAGE_PER_BLOCK: f64 = 0.2;
    pub const DEFAULT_BORDER_SAFE_ZONE: f64 = 5.0;
    pub const DEFAULT_BORDER_WARNING_BLOCKS: i32 = 5;
    pub const DEFAULT_BORDER_WARNING_TIME: i32 = 15;
}

/// Player transfer
pub mod teleport {
    /// Ticks a player waits after a dimension change before acting again
    pub const DEFAULT_SETTLE_TICKS: u32 = 1;
}
