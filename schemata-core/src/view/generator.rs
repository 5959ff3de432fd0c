//! Create / update / full-read views built from normalized models
//!
//! Related models are inlined recursively: the create view embeds relations that
//! cascade inserts, the update view those that cascade updates, the full view
//! those loaded eagerly. Targets are looked up in the registry on every call.

use super::document::{JsonType, ObjectSchema, PropertySchema};
use crate::config::SchemaConfig;
use crate::error::{SchemaError, SchemaResult};
use crate::model::Model;
use crate::registry::ModelRegistry;
use crate::schema::{CascadeOperation, ColumnDescriptor, RelationDescriptor, StorageType};
use std::fmt;

/// Base view kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Create,
    Update,
    Full,
}

impl ViewKind {
    pub fn label(&self) -> &'static str {
        match self {
            ViewKind::Create => "createSchema",
            ViewKind::Update => "updateSchema",
            ViewKind::Full => "fullSchema",
        }
    }

    fn includes_generated_columns(&self) -> bool {
        matches!(self, ViewKind::Full)
    }

    fn includes_relation(&self, relation: &RelationDescriptor) -> bool {
        match self {
            ViewKind::Create => relation.cascades(CascadeOperation::Insert),
            ViewKind::Update => relation.cascades(CascadeOperation::Update),
            ViewKind::Full => relation.eager,
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Form view kinds, each derived from a base view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Create,
    Update,
}

impl FormKind {
    pub fn label(&self) -> &'static str {
        match self {
            FormKind::Create => "formCreateSchema",
            FormKind::Update => "formUpdateSchema",
        }
    }

    pub fn base(&self) -> ViewKind {
        match self {
            FormKind::Create => ViewKind::Create,
            FormKind::Update => ViewKind::Update,
        }
    }
}

/// Deterministic `$id` for a view of `model`
pub fn schema_id(model: &str, kind: &str, prefix: Option<&str>) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}_{model}_{kind}"),
        _ => format!("{model}_{kind}"),
    }
}

/// JSON Schema type for a storage type
pub fn json_type_for(storage_type: &StorageType) -> JsonType {
    match storage_type.as_str() {
        "int" | "int2" | "int4" | "int8" | "int64" | "integer" | "tinyint" | "smallint"
        | "mediumint" | "bigint" | "unsigned big int" => JsonType::Integer,
        "float" | "float4" | "float8" | "double" | "double precision" | "real" | "dec"
        | "decimal" | "smalldecimal" | "fixed" | "numeric" | "number" | "money"
        | "smallmoney" => JsonType::Number,
        "boolean" | "bool" => JsonType::Boolean,
        "simple-json" | "json" | "jsonb" => JsonType::Object,
        "simple-array" | "array" => JsonType::Array,
        _ => JsonType::String,
    }
}

fn column_property(column: &ColumnDescriptor) -> PropertySchema {
    match json_type_for(&column.storage_type) {
        JsonType::Object => PropertySchema::Json,
        json_type => PropertySchema::Scalar(json_type),
    }
}

/// State of one recursive expansion
#[derive(Default)]
struct Expansion {
    path: Vec<String>,
    cycle_reported: bool,
}

/// Generates schema views, resolving relation targets through a registry
pub struct SchemaGenerator<'a> {
    registry: &'a ModelRegistry,
    config: SchemaConfig,
}

impl<'a> SchemaGenerator<'a> {
    pub fn new(registry: &'a ModelRegistry) -> Self {
        Self { registry, config: SchemaConfig::default() }
    }

    pub fn with_config(mut self, config: SchemaConfig) -> Self {
        self.config = config;
        self
    }

    pub(crate) fn config(&self) -> &SchemaConfig {
        &self.config
    }

    pub fn view(&self, kind: ViewKind, model: &Model, prefix: Option<&str>) -> SchemaResult<ObjectSchema> {
        let mut expansion = Expansion::default();
        self.build(kind, model, prefix, &mut expansion)
    }

    /// View of a registered model, looked up by name
    pub fn view_of(&self, kind: ViewKind, model: &str, prefix: Option<&str>) -> SchemaResult<ObjectSchema> {
        let model = self.registry.get(model)?;
        self.view(kind, &model, prefix)
    }

    pub fn create_schema(&self, model: &Model, prefix: Option<&str>) -> SchemaResult<ObjectSchema> {
        self.view(ViewKind::Create, model, prefix)
    }

    pub fn update_schema(&self, model: &Model, prefix: Option<&str>) -> SchemaResult<ObjectSchema> {
        self.view(ViewKind::Update, model, prefix)
    }

    pub fn full_schema(&self, model: &Model, prefix: Option<&str>) -> SchemaResult<ObjectSchema> {
        self.view(ViewKind::Full, model, prefix)
    }

    fn build(
        &self,
        kind: ViewKind,
        model: &Model,
        prefix: Option<&str>,
        expansion: &mut Expansion,
    ) -> SchemaResult<ObjectSchema> {
        let depth = expansion.path.len();
        if let Some(limit) = self.config.max_depth {
            if depth > limit {
                let mut path = expansion.path.clone();
                path.push(model.name().to_string());
                return Err(SchemaError::RecursionLimitExceeded { limit, path: path.join(" -> ") });
            }
        } else if !expansion.cycle_reported && expansion.path.iter().any(|name| name == model.name()) {
            expansion.cycle_reported = true;
            log::warn!(
                "Model '{}' re-enters its own {} expansion ({} -> {}); without schema.max_depth this will not terminate",
                model.name(),
                kind,
                expansion.path.join(" -> "),
                model.name()
            );
        }

        let definition = model.definition()?;
        let mut schema = ObjectSchema::new(schema_id(model.name(), kind.label(), prefix));

        for (name, column) in &definition.columns {
            if !kind.includes_generated_columns() && column.is_generated() {
                continue;
            }
            schema.properties.insert(name.clone(), column_property(column));
        }

        expansion.path.push(model.name().to_string());
        for (name, relation) in &definition.relations {
            if !kind.includes_relation(relation) {
                continue;
            }
            let target = self.registry.get(&relation.target)?;
            let nested = self.build(kind, &target, None, expansion)?.without_id();
            let property = if relation.is_to_many() {
                PropertySchema::array_of(PropertySchema::embedded(nested))
            } else {
                PropertySchema::embedded(nested)
            };
            schema.properties.insert(name.clone(), property);
        }
        expansion.path.pop();

        if kind == ViewKind::Create {
            schema.required = Some(definition.required_columns());
        }

        log::debug!(
            "Generated {} for '{}' at depth {} ({} properties)",
            kind,
            model.name(),
            depth,
            schema.properties.len()
        );

        Ok(schema)
    }
}
