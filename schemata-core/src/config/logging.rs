//! Logging configuration

use crate::logging::{LogFormat, LogLevel};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string(), format: "human".to_string() }
    }
}

impl LoggingConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(level) = env::var("SCHEMATA_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(format) = env::var("SCHEMATA_LOG_FORMAT") {
            self.format = format;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.runtime().map(|_| ())
    }

    /// Typed configuration for [`crate::logging::init_logging`]
    pub fn runtime(&self) -> Result<crate::logging::LoggingConfig> {
        let level = LogLevel::parse(&self.level)
            .ok_or_else(|| anyhow!("unknown log level '{}'", self.level))?;
        let format = LogFormat::parse(&self.format)
            .ok_or_else(|| anyhow!("unknown log format '{}'", self.format))?;
        Ok(crate::logging::LoggingConfig::default().with_level(level).with_format(format))
    }
}
