//! Field-type normalization
//!
//! Flattens a [`ModelSchema`] into the column and relation descriptors consumed
//! by the persistence layer and the schema view generator.

use super::declaration::{
    Cascade, CascadeOperation, ColumnDeclaration, FieldDeclaration, Generated, LogicalType,
    ModelSchema, RelationDeclaration, RelationKind, RelationTarget,
};
use crate::error::{SchemaError, SchemaResult};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Name of the primary column injected into every model
pub const PRIMARY_COLUMN: &str = "id";

/// Persistence-layer column type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    Varchar,
    Integer,
    Float,
    Double,
    Real,
    Date,
    Boolean,
    /// JSON serialized into a text column
    SimpleJson,
    /// Text column restricted to the declared enum values
    SimpleEnum,
    /// Storage type given verbatim by the declaration
    Raw(String),
}

impl StorageType {
    pub fn as_str(&self) -> &str {
        match self {
            StorageType::Varchar => "varchar",
            StorageType::Integer => "integer",
            StorageType::Float => "float",
            StorageType::Double => "double",
            StorageType::Real => "real",
            StorageType::Date => "date",
            StorageType::Boolean => "boolean",
            StorageType::SimpleJson => "simple-json",
            StorageType::SimpleEnum => "simple-enum",
            StorageType::Raw(raw) => raw,
        }
    }
}

impl From<LogicalType> for StorageType {
    fn from(logical: LogicalType) -> Self {
        match logical {
            LogicalType::String => StorageType::Varchar,
            LogicalType::Integer => StorageType::Integer,
            LogicalType::Float => StorageType::Float,
            LogicalType::Double => StorageType::Double,
            LogicalType::Real => StorageType::Real,
            LogicalType::Date => StorageType::Date,
            LogicalType::Boolean => StorageType::Boolean,
            LogicalType::Json => StorageType::SimpleJson,
            LogicalType::Enum => StorageType::SimpleEnum,
            // only the download URL is stored
            LogicalType::File => StorageType::SimpleJson,
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StorageType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Normalized column
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    #[serde(rename = "type")]
    pub storage_type: StorageType,
    /// Logical type the column was declared with; `None` for raw storage types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logical_type: Option<LogicalType>,
    #[serde(skip_serializing_if = "is_false")]
    pub primary: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated: Option<Generated>,
    #[serde(skip_serializing_if = "is_false")]
    pub nullable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "is_false")]
    pub unique: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub create_date: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub update_date: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub delete_date: bool,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ColumnDescriptor {
    /// The injected `id` column
    pub fn primary_id() -> Self {
        Self {
            primary: true,
            generated: Some(Generated::Flag(true)),
            ..Self::from_logical(LogicalType::Integer)
        }
    }

    fn from_logical(logical: LogicalType) -> Self {
        Self {
            storage_type: logical.into(),
            logical_type: Some(logical),
            primary: false,
            generated: None,
            nullable: false,
            default: None,
            unique: false,
            create_date: false,
            update_date: false,
            delete_date: false,
            enum_values: None,
            length: None,
            comment: None,
        }
    }

    fn from_declaration(declaration: &ColumnDeclaration) -> Self {
        let logical_type = declaration.column_type.logical();
        let storage_type = match (&declaration.column_type, logical_type) {
            (_, Some(logical)) => logical.into(),
            (column_type, None) => StorageType::Raw(String::from(column_type.clone())),
        };
        Self {
            storage_type,
            logical_type,
            primary: declaration.primary,
            generated: declaration.generated.clone(),
            nullable: declaration.nullable,
            default: declaration.default.clone(),
            unique: declaration.unique,
            create_date: declaration.create_date,
            update_date: declaration.update_date,
            delete_date: declaration.delete_date,
            enum_values: declaration.enum_values.clone(),
            length: declaration.length,
            comment: declaration.comment.clone(),
        }
    }

    /// Whether the database fills this column (generation or timestamp markers)
    pub fn is_generated(&self) -> bool {
        self.generated.as_ref().is_some_and(Generated::is_generated)
            || self.create_date
            || self.update_date
            || self.delete_date
    }

    /// Whether a create request must supply this column
    pub fn is_required(&self) -> bool {
        !self.is_generated() && !self.nullable && self.default.is_none()
    }

    pub fn is_file(&self) -> bool {
        self.logical_type == Some(LogicalType::File)
    }
}

/// Normalized relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationDescriptor {
    #[serde(rename = "type")]
    pub kind: RelationKind,
    pub target: String,
    pub cascade: Cascade,
    #[serde(skip_serializing_if = "is_false")]
    pub eager: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub join_column: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub join_table: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inverse_side: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,
}

impl RelationDescriptor {
    pub fn cascades(&self, operation: CascadeOperation) -> bool {
        self.cascade.includes(operation)
    }

    pub fn is_to_many(&self) -> bool {
        self.kind.is_to_many()
    }
}

/// Columns and relations of one model, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntityDefinition {
    pub columns: IndexMap<String, ColumnDescriptor>,
    pub relations: IndexMap<String, RelationDescriptor>,
}

impl EntityDefinition {
    /// Names of the columns a create request must supply, in declaration order
    pub fn required_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|(_, column)| column.is_required())
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn primary_columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().filter(|(_, column)| column.primary).map(|(name, _)| name.as_str())
    }
}

/// Normalize a model schema into columns and relations.
///
/// `model` only feeds error messages; the result depends on `schema` alone.
pub fn normalize(model: &str, schema: &ModelSchema) -> SchemaResult<EntityDefinition> {
    let mut definition = EntityDefinition::default();
    definition.columns.insert(PRIMARY_COLUMN.to_string(), ColumnDescriptor::primary_id());

    for (field, declaration) in schema.iter() {
        if field == PRIMARY_COLUMN {
            return Err(SchemaError::MultiplePrimaryKeys {
                model: model.to_string(),
                field: field.clone(),
            });
        }

        match declaration {
            FieldDeclaration::Scalar(logical) => {
                definition.columns.insert(field.clone(), ColumnDescriptor::from_logical(*logical));
            }
            FieldDeclaration::Column(column) => {
                if column.primary {
                    return Err(SchemaError::MultiplePrimaryKeys {
                        model: model.to_string(),
                        field: field.clone(),
                    });
                }
                definition.columns.insert(field.clone(), ColumnDescriptor::from_declaration(column));
            }
            FieldDeclaration::RelationTag(_) => {
                return Err(SchemaError::InlineRelationNotSupported {
                    model: model.to_string(),
                    field: field.clone(),
                });
            }
            FieldDeclaration::Relation(relation) => {
                let descriptor = normalize_relation(model, field, relation)?;
                definition.relations.insert(field.clone(), descriptor);
            }
        }
    }

    log::debug!(
        "Normalized model '{}': {} columns, {} relations",
        model,
        definition.columns.len(),
        definition.relations.len()
    );

    Ok(definition)
}

fn normalize_relation(
    model: &str,
    field: &str,
    relation: &RelationDeclaration,
) -> SchemaResult<RelationDescriptor> {
    let target = match &relation.target {
        RelationTarget::Name(name) => name.clone(),
        RelationTarget::Reference(_) => {
            return Err(SchemaError::UnsupportedRelationTarget {
                model: model.to_string(),
                field: field.to_string(),
            });
        }
    };

    Ok(RelationDescriptor {
        kind: relation.kind,
        target,
        cascade: relation.cascade.clone(),
        eager: relation.eager,
        join_column: relation.join_column,
        join_table: relation.join_table,
        inverse_side: relation.inverse_side.clone(),
        nullable: relation.nullable,
        on_delete: relation.on_delete.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::declaration::{ColumnType, RelationDeclaration};

    #[test]
    fn test_logical_storage_table() {
        let expected = [
            (LogicalType::String, "varchar"),
            (LogicalType::Integer, "integer"),
            (LogicalType::Float, "float"),
            (LogicalType::Double, "double"),
            (LogicalType::Real, "real"),
            (LogicalType::Date, "date"),
            (LogicalType::Boolean, "boolean"),
            (LogicalType::Json, "simple-json"),
            (LogicalType::Enum, "simple-enum"),
            (LogicalType::File, "simple-json"),
        ];
        assert_eq!(expected.len(), LogicalType::ALL.len());

        for (logical, storage) in expected {
            let schema = ModelSchema::new().field("value", logical);
            let definition = normalize("Sample", &schema).unwrap();
            assert_eq!(definition.columns["value"].storage_type.as_str(), storage, "{logical}");
        }
    }

    #[test]
    fn test_raw_storage_type_passes_through() {
        let schema = ModelSchema::new().field("body", ColumnDeclaration::new(ColumnType::raw("text")));
        let definition = normalize("Post", &schema).unwrap();
        assert_eq!(definition.columns["body"].storage_type, StorageType::Raw("text".to_string()));
        assert_eq!(definition.columns["body"].logical_type, None);
    }

    #[test]
    fn test_injected_primary_column() {
        let definition = normalize("Empty", &ModelSchema::new()).unwrap();
        let id = &definition.columns[PRIMARY_COLUMN];
        assert!(id.primary);
        assert!(id.is_generated());
        assert_eq!(id.storage_type, StorageType::Integer);
        assert_eq!(definition.primary_columns().collect::<Vec<_>>(), vec!["id"]);
    }

    #[test]
    fn test_second_primary_column_fails() {
        let schema = ModelSchema::new()
            .field("name", LogicalType::String)
            .field("code", ColumnDeclaration::new(LogicalType::String).primary());
        let err = normalize("Illegal", &schema).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MultiplePrimaryKeys { model: "Illegal".to_string(), field: "code".to_string() }
        );
    }

    #[test]
    fn test_redeclaring_id_fails() {
        let schema = ModelSchema::new().field("id", LogicalType::String);
        let err = normalize("Illegal", &schema).unwrap_err();
        assert_eq!(err.code(), "multiple_primary_keys");
    }

    #[test]
    fn test_relation_tag_fails() {
        let schema = ModelSchema::new().field("detail", RelationKind::OneToOne);
        let err = normalize("Profile", &schema).unwrap_err();
        assert_eq!(
            err,
            SchemaError::InlineRelationNotSupported {
                model: "Profile".to_string(),
                field: "detail".to_string()
            }
        );
    }

    #[test]
    fn test_reference_target_fails() {
        let relation = RelationDeclaration::new(
            RelationKind::ManyToOne,
            RelationTarget::Reference(serde_json::json!({"fn": "() => Author"})),
        );
        let schema = ModelSchema::new().field("author", relation);
        let err = normalize("Book", &schema).unwrap_err();
        assert_eq!(err.code(), "unsupported_relation_target");
    }

    #[test]
    fn test_relation_options_are_retained() {
        let relation = RelationDeclaration::new(RelationKind::ManyToMany, "Tag")
            .cascade_on([CascadeOperation::Insert])
            .eager()
            .join_table();
        let schema = ModelSchema::new().field("title", LogicalType::String).field("tags", relation);
        let definition = normalize("Post", &schema).unwrap();

        let tags = &definition.relations["tags"];
        assert_eq!(tags.kind.as_str(), "many-to-many");
        assert_eq!(tags.target, "Tag");
        assert!(tags.cascades(CascadeOperation::Insert));
        assert!(!tags.cascades(CascadeOperation::Update));
        assert!(tags.eager && tags.join_table && !tags.join_column);
        assert!(tags.is_to_many());
        assert!(!definition.columns.contains_key("tags"));
    }

    #[test]
    fn test_output_preserves_declaration_order() {
        let schema = ModelSchema::new()
            .field("zeta", LogicalType::String)
            .field("alpha", LogicalType::Integer)
            .field("when", LogicalType::Date);
        let definition = normalize("Ordered", &schema).unwrap();
        let names: Vec<&str> = definition.columns.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["id", "zeta", "alpha", "when"]);
    }

    #[test]
    fn test_required_columns() {
        let schema = ModelSchema::new()
            .field("title", LogicalType::String)
            .field("subtitle", ColumnDeclaration::new(LogicalType::String).nullable())
            .field("views", ColumnDeclaration::new(LogicalType::Integer).default_value(0))
            .field("createdAt", ColumnDeclaration::new(LogicalType::Date).create_date())
            .field("body", ColumnDeclaration::new(ColumnType::raw("text")));
        let definition = normalize("Post", &schema).unwrap();
        assert_eq!(definition.required_columns(), vec!["title", "body"]);
    }

    #[test]
    fn test_null_default_makes_column_optional() {
        let schema: ModelSchema = serde_json::from_value(serde_json::json!({
            "name": "string",
            "nickname": {"type": "string", "default": null}
        }))
        .unwrap();
        let definition = normalize("Person", &schema).unwrap();
        assert_eq!(definition.required_columns(), vec!["name"]);
        assert_eq!(definition.columns["nickname"].default, Some(serde_json::Value::Null));
    }
}
