//! Model manifests
//!
//! A manifest declares several models in one TOML or JSON document:
//!
//! ```toml
//! [models.Author.fields]
//! name = "string"
//! books = { type = "one-to-many", target = "Book", cascade = true }
//!
//! [models.Author.options]
//! tableName = "authors"
//! ```

use crate::error::SchemaResult;
use crate::persistence::RepoOptions;
use crate::registry::ModelRegistry;
use crate::schema::ModelSchema;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelManifest {
    #[serde(default)]
    pub models: IndexMap<String, ModelEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelEntry {
    #[serde(default)]
    pub fields: ModelSchema,
    #[serde(default)]
    pub options: RepoOptions,
}

impl ModelManifest {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML manifest")
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse JSON manifest")
    }

    /// Read a manifest, choosing the format by extension (`.json`, anything else is TOML)
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let manifest = if is_json { Self::from_json_str(&content) } else { Self::from_toml_str(&content) };
        manifest.with_context(|| format!("Invalid manifest: {}", path.display()))
    }

    /// Register every model in declaration order
    pub fn register_into(&self, registry: &mut ModelRegistry) -> SchemaResult<()> {
        for (name, entry) in &self.models {
            registry.define(name.as_str(), entry.fields.clone(), entry.options.clone())?;
        }
        log::debug!("Registered {} models from manifest", self.models.len());
        Ok(())
    }

    pub fn into_registry(self) -> SchemaResult<ModelRegistry> {
        let mut registry = ModelRegistry::new();
        self.register_into(&mut registry)?;
        Ok(registry)
    }
}
