//! Level lifecycle events

mod event_bus;
mod level_event;

pub use event_bus::{EventBus, LevelEventHandler};
pub use level_event::{LevelEvent, LevelEventKind};
