use crate::world::level::ServerLevel;
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelEventKind {
    Load,
}

/// Level lifecycle notification
#[derive(Debug, Clone)]
pub enum LevelEvent {
    /// A level finished registration. Fired once the level is in the level
    /// table and marked published, so registry lookups and transfers
    /// already see it.
    Load {
        level: Arc<ServerLevel>,
        timestamp: DateTime<Utc>,
    },
}

impl LevelEvent {
    pub fn load(level: Arc<ServerLevel>) -> Self {
        LevelEvent::Load {
            level,
            timestamp: Utc::now(),
        }
    }

    pub fn kind(&self) -> LevelEventKind {
        match self {
            LevelEvent::Load { .. } => LevelEventKind::Load,
        }
    }

    pub fn level(&self) -> &Arc<ServerLevel> {
        match self {
            LevelEvent::Load { level, .. } => level,
        }
    }

    /// Level events report what already happened; no subscriber can veto them
    pub fn is_cancelable(&self) -> bool {
        false
    }
}
