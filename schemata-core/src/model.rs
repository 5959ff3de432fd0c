//! Models: a named schema plus its compiled state
//!
//! Normalization runs on first use and is cached on the model. View helpers
//! resolve relation targets through the registry passed to them.

use crate::error::{SchemaError, SchemaResult};
use crate::persistence::{EntitySchema, PersistenceLayer, Repository, RepoOptions};
use crate::registry::ModelRegistry;
use crate::schema::{normalize, EntityDefinition, ModelSchema};
use crate::view::{FormKind, ObjectSchema, SchemaGenerator, ViewKind};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// A named model: its declarations, entity options and compiled state
///
/// The normalized definition is computed on first use and cached. The repository
/// handle is attached once the persistence layer has built the entity.
pub struct Model {
    name: String,
    schema: ModelSchema,
    options: RepoOptions,
    definition: OnceLock<EntityDefinition>,
    repository: OnceLock<Arc<dyn Repository>>,
}

impl Model {
    pub fn new(name: impl Into<String>, schema: ModelSchema) -> Self {
        Self::with_options(name, schema, RepoOptions::default())
    }

    pub fn with_options(name: impl Into<String>, schema: ModelSchema, options: RepoOptions) -> Self {
        Self {
            name: name.into(),
            schema,
            options,
            definition: OnceLock::new(),
            repository: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    pub fn options(&self) -> &RepoOptions {
        &self.options
    }

    /// Normalized columns and relations, computed once per model
    pub fn definition(&self) -> SchemaResult<&EntityDefinition> {
        if let Some(definition) = self.definition.get() {
            return Ok(definition);
        }
        let definition = normalize(&self.name, &self.schema)?;
        Ok(self.definition.get_or_init(|| definition))
    }

    /// The `{name, columns, relations}` triple plus declared options
    pub fn entity_schema(&self) -> SchemaResult<EntitySchema> {
        let definition = self.definition()?;
        Ok(EntitySchema {
            name: self.name.clone(),
            columns: definition.columns.clone(),
            relations: definition.relations.clone(),
            options: self.options.clone(),
        })
    }

    /// Build the repository through the persistence layer and keep it on the model
    pub fn attach_repository(&self, layer: &dyn PersistenceLayer) -> anyhow::Result<Arc<dyn Repository>> {
        if let Some(existing) = self.repository.get() {
            log::warn!("Repository for '{}' already attached, keeping the existing one", self.name);
            return Ok(Arc::clone(existing));
        }
        let entity = self.entity_schema()?;
        let repository = layer.repository(&entity)?;
        log::info!("Attached repository for '{}'", self.name);
        Ok(Arc::clone(self.repository.get_or_init(|| repository)))
    }

    pub fn repository(&self) -> SchemaResult<Arc<dyn Repository>> {
        self.repository
            .get()
            .map(Arc::clone)
            .ok_or_else(|| SchemaError::RepoNotReady(self.name.clone()))
    }

    pub fn create_schema(&self, registry: &ModelRegistry, prefix: Option<&str>) -> SchemaResult<ObjectSchema> {
        SchemaGenerator::new(registry).view(ViewKind::Create, self, prefix)
    }

    pub fn update_schema(&self, registry: &ModelRegistry, prefix: Option<&str>) -> SchemaResult<ObjectSchema> {
        SchemaGenerator::new(registry).view(ViewKind::Update, self, prefix)
    }

    pub fn full_schema(&self, registry: &ModelRegistry, prefix: Option<&str>) -> SchemaResult<ObjectSchema> {
        SchemaGenerator::new(registry).view(ViewKind::Full, self, prefix)
    }

    pub fn form_create_schema(
        &self,
        registry: &ModelRegistry,
        prefix: Option<&str>,
    ) -> SchemaResult<ObjectSchema> {
        SchemaGenerator::new(registry).form_view(FormKind::Create, self, prefix)
    }

    pub fn form_update_schema(
        &self,
        registry: &ModelRegistry,
        prefix: Option<&str>,
    ) -> SchemaResult<ObjectSchema> {
        SchemaGenerator::new(registry).form_view(FormKind::Update, self, prefix)
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .field("options", &self.options)
            .field("repository_attached", &self.repository.get().is_some())
            .finish()
    }
}
