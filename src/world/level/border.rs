//! World border and border listeners
//!
//! Derived levels do not own border settings. The overworld's border carries
//! one `DelegateBorderListener` per derived level, forwarding every change.

use crate::constants::level::{
    DEFAULT_BORDER_DAMAGE_PER_BLOCK, DEFAULT_BORDER_SAFE_ZONE, DEFAULT_BORDER_SIZE,
    DEFAULT_BORDER_WARNING_BLOCKS, DEFAULT_BORDER_WARNING_TIME,
};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Weak;

/// Snapshot of a border's settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderSettings {
    pub center_x: f64,
    pub center_z: f64,
    pub size: f64,
    pub damage_per_block: f64,
    pub safe_zone: f64,
    pub warning_blocks: i32,
    pub warning_time: i32,
}

impl Default for BorderSettings {
    fn default() -> Self {
        Self {
            center_x: 0.0,
            center_z: 0.0,
            size: DEFAULT_BORDER_SIZE,
            damage_per_block: DEFAULT_BORDER_DAMAGE_PER_BLOCK,
            safe_zone: DEFAULT_BORDER_SAFE_ZONE,
            warning_blocks: DEFAULT_BORDER_WARNING_BLOCKS,
            warning_time: DEFAULT_BORDER_WARNING_TIME,
        }
    }
}

/// A single border mutation, as seen by listeners
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BorderChange {
    Center { x: f64, z: f64 },
    Size(f64),
    DamagePerBlock(f64),
    SafeZone(f64),
    WarningBlocks(i32),
    WarningTime(i32),
}

pub trait BorderChangeListener: Send + Sync {
    fn on_border_change(&self, change: BorderChange);
}

/// Handle returned by `WorldBorder::add_listener`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BorderListenerId(u64);

pub struct WorldBorder {
    settings: RwLock<BorderSettings>,
    listeners: Mutex<Vec<(BorderListenerId, Box<dyn BorderChangeListener>)>>,
    next_listener_id: AtomicU64,
}

impl WorldBorder {
    pub fn new() -> Self {
        Self {
            settings: RwLock::new(BorderSettings::default()),
            listeners: Mutex::new(Vec::new()),
            next_listener_id: AtomicU64::new(0),
        }
    }

    pub fn settings(&self) -> BorderSettings {
        *self.settings.read()
    }

    pub fn set_center(&self, x: f64, z: f64) {
        self.apply(BorderChange::Center { x, z });
    }

    pub fn set_size(&self, size: f64) {
        self.apply(BorderChange::Size(size));
    }

    pub fn set_damage_per_block(&self, damage: f64) {
        self.apply(BorderChange::DamagePerBlock(damage));
    }

    pub fn set_safe_zone(&self, safe_zone: f64) {
        self.apply(BorderChange::SafeZone(safe_zone));
    }

    pub fn set_warning_blocks(&self, blocks: i32) {
        self.apply(BorderChange::WarningBlocks(blocks));
    }

    pub fn set_warning_time(&self, time: i32) {
        self.apply(BorderChange::WarningTime(time));
    }

    /// Apply a change and forward it to every listener
    pub fn apply(&self, change: BorderChange) {
        {
            let mut settings = self.settings.write();
            match change {
                BorderChange::Center { x, z } => {
                    settings.center_x = x;
                    settings.center_z = z;
                }
                BorderChange::Size(size) => settings.size = size,
                BorderChange::DamagePerBlock(damage) => settings.damage_per_block = damage,
                BorderChange::SafeZone(safe_zone) => settings.safe_zone = safe_zone,
                BorderChange::WarningBlocks(blocks) => settings.warning_blocks = blocks,
                BorderChange::WarningTime(time) => settings.warning_time = time,
            }
        }

        // settings lock must be released before listeners run
        let listeners = self.listeners.lock();
        for (_, listener) in listeners.iter() {
            listener.on_border_change(change);
        }
    }

    /// Overwrite every setting from a snapshot, notifying listeners per field
    pub fn copy_from(&self, settings: BorderSettings) {
        self.apply(BorderChange::Center {
            x: settings.center_x,
            z: settings.center_z,
        });
        self.apply(BorderChange::Size(settings.size));
        self.apply(BorderChange::DamagePerBlock(settings.damage_per_block));
        self.apply(BorderChange::SafeZone(settings.safe_zone));
        self.apply(BorderChange::WarningBlocks(settings.warning_blocks));
        self.apply(BorderChange::WarningTime(settings.warning_time));
    }

    pub fn add_listener(&self, listener: Box<dyn BorderChangeListener>) -> BorderListenerId {
        let id = BorderListenerId(self.next_listener_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, listener));
        id
    }

    pub fn remove_listener(&self, id: BorderListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl Default for WorldBorder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WorldBorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldBorder")
            .field("settings", &self.settings())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Forwards border changes to another level's border
pub struct DelegateBorderListener {
    target: Weak<WorldBorder>,
}

impl DelegateBorderListener {
    pub fn new(target: Weak<WorldBorder>) -> Self {
        Self { target }
    }
}

impl BorderChangeListener for DelegateBorderListener {
    fn on_border_change(&self, change: BorderChange) {
        if let Some(target) = self.target.upgrade() {
            target.apply(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_delegate_forwards_changes() {
        let source = WorldBorder::new();
        let target = Arc::new(WorldBorder::new());
        source.add_listener(Box::new(DelegateBorderListener::new(Arc::downgrade(&target))));

        source.set_size(1000.0);
        source.set_center(12.0, -4.0);

        let settings = target.settings();
        assert_eq!(settings.size, 1000.0);
        assert_eq!(settings.center_x, 12.0);
        assert_eq!(settings.center_z, -4.0);
    }

    #[test]
    fn test_remove_listener_stops_forwarding() {
        let source = WorldBorder::new();
        let target = Arc::new(WorldBorder::new());
        let id = source.add_listener(Box::new(DelegateBorderListener::new(Arc::downgrade(&target))));

        assert!(source.remove_listener(id));
        assert!(!source.remove_listener(id));
        source.set_size(500.0);

        assert_eq!(target.settings().size, DEFAULT_BORDER_SIZE);
        assert_eq!(source.listener_count(), 0);
    }

    #[test]
    fn test_dropped_target_is_ignored() {
        let source = WorldBorder::new();
        let target = Arc::new(WorldBorder::new());
        source.add_listener(Box::new(DelegateBorderListener::new(Arc::downgrade(&target))));
        drop(target);

        source.set_size(10.0);
        assert_eq!(source.settings().size, 10.0);
    }
}
