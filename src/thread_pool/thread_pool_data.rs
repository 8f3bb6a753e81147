//! Worker Pool Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in thread_pool_operations.rs

use serde::{Deserialize, Serialize};
use std::sync::atomic::AtomicU64;
use std::time::Duration;

/// Background pool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerPoolConfig {
    /// Worker count; 0 means one per logical CPU
    pub threads: usize,
    pub thread_name: String,
}

impl Default for WorkerPoolConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            thread_name: "dimension-worker".to_string(),
        }
    }
}

/// Background worker pool used for level construction work
pub struct WorkerPoolData {
    pub pool: rayon::ThreadPool,
    pub config: WorkerPoolConfig,
    pub jobs_submitted: AtomicU64,
    pub jobs_completed: AtomicU64,
}

/// Why a blocking job produced no value
#[derive(Debug, thiserror::Error)]
pub enum JobFailure {
    #[error("job panicked: {0}")]
    Panicked(String),

    #[error("job did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("worker dropped the result channel")]
    Disconnected,
}
