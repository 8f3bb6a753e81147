//! Server-side player state relevant to dimension transfers

use crate::world::core::{BlockPos, WorldKey};
use glam::DVec3;

#[derive(Debug, Clone)]
pub struct ServerPlayer {
    id: u32,
    name: String,
    level: WorldKey,
    position: DVec3,
    yaw: f32,
    pitch: f32,
    /// Ticks left before the player acts again after a transfer
    settle_ticks: u32,
}

impl ServerPlayer {
    pub fn new(id: u32, name: &str, level: WorldKey, position: DVec3) -> Self {
        Self {
            id,
            name: name.to_string(),
            level,
            position,
            yaw: 0.0,
            pitch: 0.0,
            settle_ticks: 0,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> &WorldKey {
        &self.level
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn block_pos(&self) -> BlockPos {
        BlockPos::containing(self.position)
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Pitch is clamped to straight up/down
    pub fn set_rotation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-90.0, 90.0);
    }

    pub fn settle_ticks(&self) -> u32 {
        self.settle_ticks
    }

    pub fn can_act(&self) -> bool {
        self.settle_ticks == 0
    }

    pub fn tick(&mut self) {
        self.settle_ticks = self.settle_ticks.saturating_sub(1);
    }

    pub(crate) fn relocate(
        &mut self,
        level: WorldKey,
        position: DVec3,
        yaw: f32,
        pitch: f32,
        settle_ticks: u32,
    ) {
        self.level = level;
        self.position = position;
        self.set_rotation(yaw, pitch);
        self.settle_ticks = settle_ticks;
    }
}
