//! Configuration for dimension registration, workers, teleports and logging
//!
//! Loaded from TOML. Every section and field is optional:
//!
//! ```toml
//! [registry]
//! progress_listener_radius = 11
//! factory_timeout_ms = 30000
//! stem_lifecycle = "experimental"
//!
//! [workers]
//! threads = 0
//!
//! [teleport]
//! settle_ticks = 1
//!
//! [logging]
//! level = "info"
//! ```

use crate::constants::level::PROGRESS_LISTENER_RADIUS;
use crate::constants::teleport::DEFAULT_SETTLE_TICKS;
use crate::error::DimensionResult;
use crate::host::Lifecycle;
use crate::logging::LoggingConfig;
use crate::thread_pool::WorkerPoolConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Largest progress radius a new level may watch
const MAX_PROGRESS_RADIUS: u32 = 32;
/// Upper bound for the post-teleport settle delay (10 seconds)
const MAX_SETTLE_TICKS: u32 = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub progress_listener_radius: u32,
    /// Upper bound on stem factory runtime; unbounded when absent
    pub factory_timeout_ms: Option<u64>,
    /// Lifecycle recorded for stems registered at runtime
    pub stem_lifecycle: Lifecycle,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            progress_listener_radius: PROGRESS_LISTENER_RADIUS,
            factory_timeout_ms: None,
            stem_lifecycle: Lifecycle::Experimental,
        }
    }
}

impl RegistryConfig {
    pub fn factory_timeout(&self) -> Option<Duration> {
        self.factory_timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleportConfig {
    /// Ticks a player stays idle after changing dimension
    pub settle_ticks: u32,
}

impl Default for TeleportConfig {
    fn default() -> Self {
        Self {
            settle_ticks: DEFAULT_SETTLE_TICKS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionsConfig {
    pub registry: RegistryConfig,
    pub workers: WorkerPoolConfig,
    pub teleport: TeleportConfig,
    pub logging: LoggingConfig,
}

impl DimensionsConfig {
    /// Read and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        log::info!("[DimensionsConfig] Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> DimensionResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        let radius = self.registry.progress_listener_radius;
        if radius > MAX_PROGRESS_RADIUS {
            return Err(anyhow::anyhow!(
                "DimensionsConfig: registry.progress_listener_radius {} exceeds maximum of {}",
                radius,
                MAX_PROGRESS_RADIUS
            ));
        }

        if self.registry.factory_timeout_ms == Some(0) {
            return Err(anyhow::anyhow!(
                "DimensionsConfig: registry.factory_timeout_ms cannot be 0; omit it for no timeout"
            ));
        }

        if self.workers.thread_name.is_empty() {
            return Err(anyhow::anyhow!(
                "DimensionsConfig: workers.thread_name cannot be empty"
            ));
        }

        if self.teleport.settle_ticks > MAX_SETTLE_TICKS {
            return Err(anyhow::anyhow!(
                "DimensionsConfig: teleport.settle_ticks {} exceeds maximum of {}",
                self.teleport.settle_ticks,
                MAX_SETTLE_TICKS
            ));
        }

        if self.logging.level_filter().is_none() {
            return Err(anyhow::anyhow!(
                "DimensionsConfig: logging.level '{}' is not a log level",
                self.logging.level
            ));
        }

        Ok(())
    }

    /// Pretty JSON rendering for diagnostics
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("<unserializable: {}>", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DimensionsConfig::default();
        assert_eq!(config.registry.progress_listener_radius, 11);
        assert_eq!(config.registry.stem_lifecycle, Lifecycle::Experimental);
        assert_eq!(config.registry.factory_timeout(), None);
        assert_eq!(config.teleport.settle_ticks, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DimensionsConfig::from_toml_str(
            r#"
            [registry]
            factory_timeout_ms = 2500

            [teleport]
            settle_ticks = 3
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.registry.factory_timeout(), Some(Duration::from_millis(2500)));
        assert_eq!(config.registry.progress_listener_radius, 11);
        assert_eq!(config.teleport.settle_ticks, 3);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = DimensionsConfig::default();
        config.registry.progress_listener_radius = 64;
        assert!(config.validate().is_err());

        let mut config = DimensionsConfig::default();
        config.registry.factory_timeout_ms = Some(0);
        assert!(config.validate().is_err());

        let mut config = DimensionsConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[registry]\nstem_lifecycle = \"stable\"\n[workers]\nthreads = 2")
            .expect("write config");

        let config = DimensionsConfig::load(file.path()).expect("load config");
        assert_eq!(config.registry.stem_lifecycle, Lifecycle::Stable);
        assert_eq!(config.workers.threads, 2);
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[registry]\nprogress_listener_radius = \"wide\"").expect("write config");

        let error = DimensionsConfig::load(file.path()).expect_err("invalid config");
        assert!(format!("{:#}", error).contains("parsing config"));
    }

    #[test]
    fn test_json_rendering() {
        let json = DimensionsConfig::default().to_json_pretty();
        assert!(json.contains("\"progress_listener_radius\": 11"));
    }
}
