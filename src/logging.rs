//! Logging setup
//!
//! Library code logs through the `log` facade with `[Component::function]`
//! prefixes. Binaries and tests call `init_logging` once to install
//! `env_logger`; `RUST_LOG` overrides the configured level.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of off, error, warn, info, debug, trace
    pub level: String,
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            timestamps: true,
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Option<log::LevelFilter> {
        log::LevelFilter::from_str(&self.level).ok()
    }
}

/// Install the global logger. Returns false if one was already installed.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(config.level_filter().unwrap_or(log::LevelFilter::Info));
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    if !config.timestamps {
        builder.format_timestamp(None);
    }

    match builder.try_init() {
        Ok(()) => {
            log::debug!("[init_logging] Logger installed at level {}", config.level);
            true
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter_parsing() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            timestamps: false,
        };
        assert_eq!(config.level_filter(), Some(log::LevelFilter::Debug));

        let bad = LoggingConfig {
            level: "loud".to_string(),
            timestamps: false,
        };
        assert_eq!(bad.level_filter(), None);
    }

    #[test]
    fn test_second_init_is_rejected() {
        let config = LoggingConfig::default();
        init_logging(&config);
        assert!(!init_logging(&config));
    }
}
