//! Field declarations as authored by users
//!
//! A declaration is one of four explicit variants. Which one applies is decided
//! when the declaration is read: a shorthand tag is matched against the scalar
//! and relation vocabularies, and an expanded table is a relation exactly when
//! its `type` names a relation kind.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Logical scalar types understood by the compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogicalType {
    String,
    Integer,
    Float,
    Double,
    Real,
    Date,
    Json,
    Boolean,
    Enum,
    /// Stored as a reference (download URL), never the binary itself
    File,
}

impl LogicalType {
    pub const ALL: [LogicalType; 10] = [
        LogicalType::String,
        LogicalType::Integer,
        LogicalType::Float,
        LogicalType::Double,
        LogicalType::Real,
        LogicalType::Date,
        LogicalType::Json,
        LogicalType::Boolean,
        LogicalType::Enum,
        LogicalType::File,
    ];

    /// Parse a logical type tag.
    ///
    /// Accepts the lowercase names, their short aliases (`varchar`, `int`, `bool`) and
    /// the upper-case tags (`VARCHAR`, `INT`, `BOOL`, ...).
    /// Anything else is not a logical type and is treated as a raw storage type by callers.
    pub fn parse(tag: &str) -> Option<Self> {
        let parsed = match tag {
            "string" | "varchar" | "VARCHAR" | "STRING" => LogicalType::String,
            "integer" | "int" | "INT" | "INTEGER" => LogicalType::Integer,
            "float" | "FLOAT" => LogicalType::Float,
            "double" | "DOUBLE" => LogicalType::Double,
            "real" | "REAL" => LogicalType::Real,
            "date" | "DATE" => LogicalType::Date,
            "json" | "JSON" => LogicalType::Json,
            "boolean" | "bool" | "BOOL" | "BOOLEAN" => LogicalType::Boolean,
            "enum" | "ENUM" => LogicalType::Enum,
            "file" | "FILE" => LogicalType::File,
            _ => return None,
        };
        Some(parsed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalType::String => "string",
            LogicalType::Integer => "integer",
            LogicalType::Float => "float",
            LogicalType::Double => "double",
            LogicalType::Real => "real",
            LogicalType::Date => "date",
            LogicalType::Json => "json",
            LogicalType::Boolean => "boolean",
            LogicalType::Enum => "enum",
            LogicalType::File => "file",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for LogicalType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LogicalType::parse(&value).ok_or_else(|| format!("unknown logical type '{value}'"))
    }
}

impl From<LogicalType> for String {
    fn from(value: LogicalType) -> Self {
        value.as_str().to_string()
    }
}

/// Relation cardinalities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RelationKind {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl RelationKind {
    /// Parse `one-to-one`, `one_to_one` or `ONE_TO_ONE` style tags
    pub fn parse(tag: &str) -> Option<Self> {
        let normalized = tag.to_ascii_lowercase().replace('_', "-");
        let parsed = match normalized.as_str() {
            "one-to-one" => RelationKind::OneToOne,
            "one-to-many" => RelationKind::OneToMany,
            "many-to-one" => RelationKind::ManyToOne,
            "many-to-many" => RelationKind::ManyToMany,
            _ => return None,
        };
        Some(parsed)
    }

    /// Name in the persistence layer's relation vocabulary
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::OneToOne => "one-to-one",
            RelationKind::OneToMany => "one-to-many",
            RelationKind::ManyToOne => "many-to-one",
            RelationKind::ManyToMany => "many-to-many",
        }
    }

    /// Whether the relation holds a collection of related records
    pub fn is_to_many(&self) -> bool {
        matches!(self, RelationKind::OneToMany | RelationKind::ManyToMany)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for RelationKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RelationKind::parse(&value).ok_or_else(|| format!("unknown relation kind '{value}'"))
    }
}

impl From<RelationKind> for String {
    fn from(value: RelationKind) -> Self {
        value.as_str().to_string()
    }
}

/// Declared column type: a logical type or a raw storage type passed through as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    Logical(LogicalType),
    Raw(String),
}

impl ColumnType {
    pub fn raw(storage_type: impl Into<String>) -> Self {
        ColumnType::Raw(storage_type.into())
    }

    pub fn logical(&self) -> Option<LogicalType> {
        match self {
            ColumnType::Logical(logical) => Some(*logical),
            ColumnType::Raw(_) => None,
        }
    }
}

impl From<String> for ColumnType {
    fn from(value: String) -> Self {
        match LogicalType::parse(&value) {
            Some(logical) => ColumnType::Logical(logical),
            None => ColumnType::Raw(value),
        }
    }
}

impl From<ColumnType> for String {
    fn from(value: ColumnType) -> Self {
        match value {
            ColumnType::Logical(logical) => logical.as_str().to_string(),
            ColumnType::Raw(raw) => raw,
        }
    }
}

impl From<LogicalType> for ColumnType {
    fn from(value: LogicalType) -> Self {
        ColumnType::Logical(value)
    }
}

/// Value generation for a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Generated {
    Flag(bool),
    Strategy(GenerationStrategy),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStrategy {
    Increment,
    Uuid,
    Rowid,
}

impl Generated {
    pub fn is_generated(&self) -> bool {
        !matches!(self, Generated::Flag(false))
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

// an explicit null is still a declared default
fn present_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error> {
    serde_json::Value::deserialize(deserializer).map(Some)
}

/// Expanded scalar declaration: `{type = ..., ...column options}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ColumnDeclaration {
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default, skip_serializing_if = "is_false")]
    pub nullable: bool,
    /// `Some(Value::Null)` when the declaration says `default: null`
    #[serde(default, deserialize_with = "present_value", skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated: Option<Generated>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub primary: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub unique: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub create_date: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub update_date: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub delete_date: bool,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ColumnDeclaration {
    pub fn new(column_type: impl Into<ColumnType>) -> Self {
        Self {
            column_type: column_type.into(),
            nullable: false,
            default: None,
            generated: None,
            primary: false,
            unique: false,
            create_date: false,
            update_date: false,
            delete_date: false,
            enum_values: None,
            length: None,
            comment: None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn generated(mut self) -> Self {
        self.generated = Some(Generated::Flag(true));
        self
    }

    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn create_date(mut self) -> Self {
        self.create_date = true;
        self
    }

    pub fn update_date(mut self) -> Self {
        self.update_date = true;
        self
    }

    pub fn delete_date(mut self) -> Self {
        self.delete_date = true;
        self
    }

    pub fn enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// Target of a relation as declared
///
/// Only plain model names can be resolved; any other shape (a table standing in
/// for a function or reference) is kept so normalization can reject it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationTarget {
    Name(String),
    Reference(serde_json::Value),
}

impl From<&str> for RelationTarget {
    fn from(value: &str) -> Self {
        RelationTarget::Name(value.to_string())
    }
}

impl From<String> for RelationTarget {
    fn from(value: String) -> Self {
        RelationTarget::Name(value)
    }
}

/// Operations a cascade list may name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CascadeOperation {
    Insert,
    Update,
    Remove,
    SoftRemove,
    Recover,
}

/// Cascade configuration: everything, nothing, or an explicit list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cascade {
    All(bool),
    Operations(Vec<CascadeOperation>),
}

impl Default for Cascade {
    fn default() -> Self {
        Cascade::All(false)
    }
}

impl Cascade {
    pub fn includes(&self, operation: CascadeOperation) -> bool {
        match self {
            Cascade::All(all) => *all,
            Cascade::Operations(operations) => operations.contains(&operation),
        }
    }

    fn is_disabled(&self) -> bool {
        matches!(self, Cascade::All(false))
    }
}

/// Expanded relation declaration: `{type = <relation kind>, target = ..., ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RelationDeclaration {
    #[serde(rename = "type")]
    pub kind: RelationKind,
    pub target: RelationTarget,
    #[serde(default, skip_serializing_if = "Cascade::is_disabled")]
    pub cascade: Cascade,
    #[serde(default, skip_serializing_if = "is_false")]
    pub eager: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub join_column: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub join_table: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse_side: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,
}

impl RelationDeclaration {
    pub fn new(kind: RelationKind, target: impl Into<RelationTarget>) -> Self {
        Self {
            kind,
            target: target.into(),
            cascade: Cascade::default(),
            eager: false,
            join_column: false,
            join_table: false,
            inverse_side: None,
            nullable: None,
            on_delete: None,
        }
    }

    pub fn cascade(mut self, cascade: Cascade) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn cascade_all(self) -> Self {
        self.cascade(Cascade::All(true))
    }

    pub fn cascade_on(self, operations: impl IntoIterator<Item = CascadeOperation>) -> Self {
        self.cascade(Cascade::Operations(operations.into_iter().collect()))
    }

    pub fn eager(mut self) -> Self {
        self.eager = true;
        self
    }

    pub fn join_column(mut self) -> Self {
        self.join_column = true;
        self
    }

    pub fn join_table(mut self) -> Self {
        self.join_table = true;
        self
    }

    pub fn inverse_side(mut self, property: impl Into<String>) -> Self {
        self.inverse_side = Some(property.into());
        self
    }
}

/// A single field declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldDeclaration {
    /// Logical type tag, e.g. `"string"`
    Scalar(LogicalType),
    /// `{type = <logical or raw storage type>, ...}`
    Column(ColumnDeclaration),
    /// Bare relation kind; always rejected during normalization
    RelationTag(RelationKind),
    /// `{type = <relation kind>, target = ..., ...}`
    Relation(RelationDeclaration),
}

impl From<LogicalType> for FieldDeclaration {
    fn from(value: LogicalType) -> Self {
        FieldDeclaration::Scalar(value)
    }
}

impl From<ColumnDeclaration> for FieldDeclaration {
    fn from(value: ColumnDeclaration) -> Self {
        FieldDeclaration::Column(value)
    }
}

impl From<RelationKind> for FieldDeclaration {
    fn from(value: RelationKind) -> Self {
        FieldDeclaration::RelationTag(value)
    }
}

impl From<RelationDeclaration> for FieldDeclaration {
    fn from(value: RelationDeclaration) -> Self {
        FieldDeclaration::Relation(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDeclaration {
    Tag(String),
    Expanded(serde_json::Map<String, serde_json::Value>),
}

impl TryFrom<RawDeclaration> for FieldDeclaration {
    type Error = String;

    fn try_from(raw: RawDeclaration) -> Result<Self, Self::Error> {
        match raw {
            RawDeclaration::Tag(tag) => {
                if let Some(kind) = RelationKind::parse(&tag) {
                    return Ok(FieldDeclaration::RelationTag(kind));
                }
                LogicalType::parse(&tag).map(FieldDeclaration::Scalar).ok_or_else(|| {
                    format!("unknown field type '{tag}'; raw storage types need the form {{ type = \"{tag}\" }}")
                })
            }
            RawDeclaration::Expanded(table) => {
                let tag = match table.get("type") {
                    Some(serde_json::Value::String(tag)) => tag.clone(),
                    Some(_) => return Err("field 'type' must be a string".to_string()),
                    None => return Err("missing field 'type'".to_string()),
                };
                let value = serde_json::Value::Object(table);
                if RelationKind::parse(&tag).is_some() {
                    serde_json::from_value(value)
                        .map(FieldDeclaration::Relation)
                        .map_err(|e| format!("invalid relation declaration: {e}"))
                } else {
                    serde_json::from_value(value)
                        .map(FieldDeclaration::Column)
                        .map_err(|e| format!("invalid column declaration: {e}"))
                }
            }
        }
    }
}

impl<'de> Deserialize<'de> for FieldDeclaration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawDeclaration::deserialize(deserializer)?;
        FieldDeclaration::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// User-authored mapping of field name to declaration, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelSchema {
    fields: IndexMap<String, FieldDeclaration>,
}

impl ModelSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field declaration
    pub fn field(mut self, name: impl Into<String>, declaration: impl Into<FieldDeclaration>) -> Self {
        self.insert(name, declaration);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, declaration: impl Into<FieldDeclaration>) {
        self.fields.insert(name.into(), declaration.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldDeclaration> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldDeclaration)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldDeclaration>> FromIterator<(K, V)> for ModelSchema {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut schema = ModelSchema::new();
        for (name, declaration) in iter {
            schema.insert(name, declaration);
        }
        schema
    }
}
