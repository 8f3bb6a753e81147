//! Error handling for dimension creation and player transfer
//!
//! Every fallible registry or teleport operation returns a `DimensionResult`.
//! Failures are reported to the caller; nothing here is retried.

use std::error::Error as StdError;
use std::fmt;

/// Main error type for hearth-dimensions
#[derive(Debug)]
pub enum DimensionError {
    // Creation Errors
    Factory {
        key: String,
        error: String,
    },
    DependencyUnavailable {
        dependency: String,
    },
    /// Two creations raced for one key. Per-key locking makes this
    /// unreachable; seeing it means an invariant was broken.
    ConcurrentCreationConflict {
        key: String,
    },
    StemRegistration {
        key: String,
        reason: String,
    },
    InvalidDimensionType {
        key: String,
        reason: String,
    },
    /// A side effect panicked while the level was being registered
    SideEffect {
        key: String,
        step: String,
        error: String,
    },

    // Key Errors
    InvalidKey {
        value: String,
        reason: String,
    },

    // Transfer Errors
    NotPublished {
        key: String,
    },
    ChunkLoad {
        level: String,
        chunk: (i32, i32),
        error: String,
    },

    // Threading Errors
    WorkerPool {
        error: String,
    },

    // Configuration Errors
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },
}

impl fmt::Display for DimensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionError::Factory { key, error } => {
                write!(f, "Level factory failed for {}: {}", key, error)
            }
            DimensionError::DependencyUnavailable { dependency } => {
                write!(f, "Required level {} is not loaded", dependency)
            }
            DimensionError::ConcurrentCreationConflict { key } => {
                write!(f, "Level {} was created twice concurrently", key)
            }
            DimensionError::StemRegistration { key, reason } => {
                write!(f, "Could not register level stem {}: {}", key, reason)
            }
            DimensionError::InvalidDimensionType { key, reason } => {
                write!(f, "Invalid dimension type for {}: {}", key, reason)
            }
            DimensionError::SideEffect { key, step, error } => {
                write!(f, "Registering {} failed at {}: {}", key, step, error)
            }

            DimensionError::InvalidKey { value, reason } => {
                write!(f, "Invalid resource location '{}': {}", value, reason)
            }

            DimensionError::NotPublished { key } => {
                write!(f, "Level {} has not finished registration", key)
            }
            DimensionError::ChunkLoad {
                level,
                chunk,
                error,
            } => write!(
                f,
                "Failed to load chunk {:?} in {}: {}",
                chunk, level, error
            ),

            DimensionError::WorkerPool { error } => write!(f, "Worker pool error: {}", error),

            DimensionError::InvalidConfig {
                field,
                value,
                reason,
            } => write!(f, "Invalid config: {} = {} ({})", field, value, reason),
        }
    }
}

impl StdError for DimensionError {}

/// Type alias for Results in hearth-dimensions
pub type DimensionResult<T> = Result<T, DimensionError>;

impl From<toml::de::Error> for DimensionError {
    fn from(error: toml::de::Error) -> Self {
        DimensionError::InvalidConfig {
            field: "<document>".to_string(),
            value: String::new(),
            reason: error.to_string(),
        }
    }
}

impl From<crate::world::error::ChunkError> for DimensionError {
    fn from(error: crate::world::error::ChunkError) -> Self {
        use crate::world::error::ChunkError;
        match &error {
            ChunkError::OutsideWorld { level, pos } => DimensionError::ChunkLoad {
                level: level.clone(),
                chunk: (pos.x, pos.z),
                error: error.to_string(),
            },
        }
    }
}

/// Convert Option to Result with context
pub trait OptionExt<T> {
    fn ok_or_dimension<F>(self, f: F) -> DimensionResult<T>
    where
        F: FnOnce() -> DimensionError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_dimension<F>(self, f: F) -> DimensionResult<T>
    where
        F: FnOnce() -> DimensionError,
    {
        self.ok_or_else(f)
    }
}

/// Attach the failing level key to an arbitrary error
pub trait ErrorContext<T> {
    fn factory_context(self, key: &str) -> DimensionResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: fmt::Display,
{
    fn factory_context(self, key: &str) -> DimensionResult<T> {
        self.map_err(|e| DimensionError::Factory {
            key: key.to_string(),
            error: format!("{:#}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DimensionError::DependencyUnavailable {
            dependency: "minecraft:overworld".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Required level minecraft:overworld is not loaded"
        );
    }

    #[test]
    fn test_option_ext() {
        let opt: Option<i32> = None;
        let result = opt.ok_or_dimension(|| DimensionError::NotPublished {
            key: "test:void".to_string(),
        });
        assert!(matches!(result, Err(DimensionError::NotPublished { .. })));
    }

    #[test]
    fn test_factory_context_keeps_message() {
        let result: Result<(), anyhow::Error> = Err(anyhow::anyhow!("no generator"));
        match result.factory_context("test:void") {
            Err(DimensionError::Factory { key, error }) => {
                assert_eq!(key, "test:void");
                assert_eq!(error, "no generator");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_side_effect_display_names_step() {
        let err = DimensionError::SideEffect {
            key: "test:void".to_string(),
            step: "mark_worlds_dirty".to_string(),
            error: "host exploded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Registering test:void failed at mark_worlds_dirty: host exploded"
        );
    }
}
