//! Named store of models
//!
//! Relation targets are resolved by name through a [`ModelRegistry`] while schema
//! views are generated, so a model may reference one registered after it as long
//! as both are registered before the first view is requested.

use crate::error::{SchemaError, SchemaResult};
use crate::model::Model;
use crate::persistence::{EntitySchema, RepoOptions};
use crate::schema::ModelSchema;
use indexmap::IndexMap;
use std::sync::Arc;

/// Registry of models keyed by unique name, in registration order
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: IndexMap<String, Arc<Model>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self { models: IndexMap::new() }
    }

    /// Register a model under its own name
    pub fn register(&mut self, model: Model) -> SchemaResult<Arc<Model>> {
        let name = model.name().to_string();
        if self.models.contains_key(&name) {
            return Err(SchemaError::DuplicateModelName(name));
        }
        let model = Arc::new(model);
        self.models.insert(name.clone(), Arc::clone(&model));
        log::info!("Registered model '{}'", name);
        Ok(model)
    }

    /// Build and register a model in one step
    pub fn define(
        &mut self,
        name: impl Into<String>,
        schema: ModelSchema,
        options: RepoOptions,
    ) -> SchemaResult<Arc<Model>> {
        self.register(Model::with_options(name, schema, options))
    }

    pub fn get(&self, name: &str) -> SchemaResult<Arc<Model>> {
        self.models
            .get(name)
            .map(Arc::clone)
            .ok_or_else(|| SchemaError::UnknownModelReference(name.to_string()))
    }

    pub fn all(&self) -> &IndexMap<String, Arc<Model>> {
        &self.models
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Forget every model
    pub fn reset(&mut self) {
        self.models.clear();
    }

    /// Entity schemas of every registered model, in registration order
    pub fn entities(&self) -> SchemaResult<Vec<EntitySchema>> {
        self.models.values().map(|model| model.entity_schema()).collect()
    }

    /// Check that every relation points to a registered model
    pub fn validate_integrity(&self) -> SchemaResult<()> {
        for model in self.models.values() {
            for relation in model.definition()?.relations.values() {
                if !self.models.contains_key(&relation.target) {
                    return Err(SchemaError::UnknownModelReference(relation.target.clone()));
                }
            }
        }
        Ok(())
    }

    /// Model name -> names of the models its relations target
    pub fn dependency_graph(&self) -> SchemaResult<IndexMap<String, Vec<String>>> {
        let mut graph = IndexMap::new();
        for (name, model) in &self.models {
            let targets =
                model.definition()?.relations.values().map(|relation| relation.target.clone()).collect();
            graph.insert(name.clone(), targets);
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{LogicalType, RelationDeclaration, RelationKind};

    fn author_schema() -> ModelSchema {
        ModelSchema::new().field("name", LogicalType::String)
    }

    fn book_schema() -> ModelSchema {
        ModelSchema::new()
            .field("title", LogicalType::String)
            .field("author", RelationDeclaration::new(RelationKind::ManyToOne, "Author").cascade_all())
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ModelRegistry::new();
        registry.define("Author", author_schema(), RepoOptions::default()).unwrap();

        assert!(registry.contains("Author"));
        assert_eq!(registry.get("Author").unwrap().name(), "Author");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_name_fails() {
        let mut registry = ModelRegistry::new();
        registry.register(Model::new("A", ModelSchema::new())).unwrap();
        let err = registry.register(Model::new("A", ModelSchema::new())).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateModelName("A".to_string()));
    }

    #[test]
    fn test_missing_model_fails() {
        let registry = ModelRegistry::new();
        let err = registry.get("missing").unwrap_err();
        assert_eq!(err, SchemaError::UnknownModelReference("missing".to_string()));
    }

    #[test]
    fn test_reset_clears_registry() {
        let mut registry = ModelRegistry::new();
        registry.register(Model::new("A", ModelSchema::new())).unwrap();
        registry.reset();
        assert!(registry.is_empty());
        // the name is free again
        assert!(registry.register(Model::new("A", ModelSchema::new())).is_ok());
    }

    #[test]
    fn test_all_keeps_registration_order() {
        let mut registry = ModelRegistry::new();
        for name in ["Zebra", "Apple", "Mango"] {
            registry.register(Model::new(name, ModelSchema::new())).unwrap();
        }
        let names: Vec<&str> = registry.all().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Zebra", "Apple", "Mango"]);
    }

    #[test]
    fn test_integrity_and_dependency_graph() {
        let mut registry = ModelRegistry::new();
        registry.define("Book", book_schema(), RepoOptions::default()).unwrap();
        assert_eq!(
            registry.validate_integrity().unwrap_err(),
            SchemaError::UnknownModelReference("Author".to_string())
        );

        registry.define("Author", author_schema(), RepoOptions::default()).unwrap();
        assert!(registry.validate_integrity().is_ok());

        let graph = registry.dependency_graph().unwrap();
        assert_eq!(graph["Book"], vec!["Author".to_string()]);
        assert!(graph["Author"].is_empty());
    }

    #[test]
    fn test_entities_in_registration_order() {
        let mut registry = ModelRegistry::new();
        registry.define("Author", author_schema(), RepoOptions::default()).unwrap();
        registry.define("Book", book_schema(), RepoOptions::default()).unwrap();

        let entities = registry.entities().unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].name, "Author");
        assert_eq!(entities[1].relations["author"].target, "Author");
    }
}
