//! Schema generation configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_FILE_ANNOTATION_KEY: &str = "customSwaggerProps";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Maximum relation embedding depth; `None` expands without a guard
    pub max_depth: Option<usize>,
    /// Key of the upload annotation placed on form file fields
    pub file_annotation_key: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self { max_depth: None, file_annotation_key: DEFAULT_FILE_ANNOTATION_KEY.to_string() }
    }
}

impl SchemaConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(depth) = env::var("SCHEMATA_MAX_DEPTH") {
            match depth.parse() {
                Ok(depth) => self.max_depth = Some(depth),
                Err(_) => log::warn!("Ignoring SCHEMATA_MAX_DEPTH={depth}: not a number"),
            }
        }
        if let Ok(key) = env::var("SCHEMATA_FILE_ANNOTATION_KEY") {
            self.file_annotation_key = key;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == Some(0) {
            bail!("schema.max_depth must be at least 1");
        }
        if self.file_annotation_key.trim().is_empty() {
            bail!("schema.file_annotation_key cannot be empty");
        }
        Ok(())
    }
}
