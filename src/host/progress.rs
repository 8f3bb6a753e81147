//! Chunk progress listeners
//!
//! Every level gets a listener from the server's factory when it is built.
//! The listener watches a square of chunks around the level's spawn.

use crate::world::core::ChunkPos;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkStatus {
    Empty,
    Full,
}

pub trait ChunkProgressListener: Send + Sync {
    fn update_spawn_position(&self, center: ChunkPos);
    fn on_status_change(&self, pos: ChunkPos, status: ChunkStatus);
    fn start(&self);
    fn stop(&self);
}

pub trait ChunkProgressListenerFactory: Send + Sync {
    fn create(&self, radius: u32) -> Box<dyn ChunkProgressListener>;
}

/// Logs spawn-area loading progress in percent
pub struct LoggingProgressListener {
    radius: u32,
    total: usize,
    center: Mutex<Option<ChunkPos>>,
    completed: AtomicUsize,
}

impl LoggingProgressListener {
    pub fn new(radius: u32) -> Self {
        let diameter = radius as usize * 2 + 1;
        Self {
            radius,
            total: diameter * diameter,
            center: Mutex::new(None),
            completed: AtomicUsize::new(0),
        }
    }

    pub fn progress_percent(&self) -> u32 {
        let completed = self.completed.load(Ordering::Acquire).min(self.total);
        ((completed * 100) / self.total) as u32
    }
}

impl ChunkProgressListener for LoggingProgressListener {
    fn update_spawn_position(&self, center: ChunkPos) {
        *self.center.lock() = Some(center);
    }

    fn on_status_change(&self, pos: ChunkPos, status: ChunkStatus) {
        if status != ChunkStatus::Full {
            return;
        }
        let within = match *self.center.lock() {
            Some(center) => center.distance(pos) <= self.radius,
            None => false,
        };
        if within {
            self.completed.fetch_add(1, Ordering::AcqRel);
            log::trace!(
                "[LoggingProgressListener] Preparing spawn area: {}%",
                self.progress_percent()
            );
        }
    }

    fn start(&self) {
        self.completed.store(0, Ordering::Release);
    }

    fn stop(&self) {
        log::debug!(
            "[LoggingProgressListener] Spawn area finished at {}%",
            self.progress_percent()
        );
    }
}

#[derive(Debug, Default)]
pub struct LoggingProgressListenerFactory;

impl ChunkProgressListenerFactory for LoggingProgressListenerFactory {
    fn create(&self, radius: u32) -> Box<dyn ChunkProgressListener> {
        Box::new(LoggingProgressListener::new(radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_counts_chunks_within_radius() {
        let listener = LoggingProgressListener::new(1);
        listener.update_spawn_position(ChunkPos::new(0, 0));
        listener.start();

        listener.on_status_change(ChunkPos::new(1, 1), ChunkStatus::Full);
        listener.on_status_change(ChunkPos::new(5, 0), ChunkStatus::Full);
        listener.on_status_change(ChunkPos::new(0, 0), ChunkStatus::Empty);

        // 1 of 9 chunks
        assert_eq!(listener.progress_percent(), 11);
    }
}
