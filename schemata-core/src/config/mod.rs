//! Configuration system for Schemata
//!
//! # Configuration Hierarchy
//!
//! Configuration values are resolved in the following order (highest priority wins):
//!
//! 1. **Environment Variables** - Override file config
//! 2. **Config File** (schemata.toml) - Override defaults
//! 3. **Defaults** - Lowest priority
//!
//! # Example
//!
//! ```no_run
//! use schemata_core::config::SchemataConfig;
//!
//! let config = SchemataConfig::load()?;
//! let config = SchemataConfig::from_file("schemata.toml")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod logging;
pub mod schema;

pub use logging::LoggingConfig;
pub use schema::SchemaConfig;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "schemata.toml";

/// Complete Schemata configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemataConfig {
    pub schema: SchemaConfig,
    pub logging: LoggingConfig,
}

impl SchemataConfig {
    /// Load `schemata.toml` from the working directory if present, then the environment
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut config = Self::default();

        if path.exists() {
            let file_config = Self::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.merge(file_config);
        }

        config.apply_env_vars();

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.as_ref().display()))
    }

    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.schema.merge(other.schema);
        self.logging.merge(other.logging);
    }

    pub fn apply_env_vars(&mut self) {
        self.schema.apply_env_vars();
        self.logging.apply_env_vars();
    }

    pub fn validate(&self) -> Result<()> {
        self.schema.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
