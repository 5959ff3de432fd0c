//! Typed JSON Schema documents produced by the view generator

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Native JSON Schema types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
}

/// Schema of one property inside an object view
#[derive(Debug, Clone, PartialEq)]
pub enum PropertySchema {
    /// `{type: <t>}`
    Scalar(JsonType),
    /// Free-form JSON: `{type: object, additionalProperties: true}`
    Json,
    /// A related model's view, `$id` stripped
    Embedded(Box<ObjectSchema>),
    /// `{type: array, items: ...}`
    Array(Box<PropertySchema>),
    /// Upload placeholder used by form views
    FileUpload { annotation_key: String },
}

impl PropertySchema {
    pub fn array_of(items: PropertySchema) -> Self {
        PropertySchema::Array(Box::new(items))
    }

    pub fn embedded(schema: ObjectSchema) -> Self {
        PropertySchema::Embedded(Box::new(schema))
    }

    pub fn as_embedded(&self) -> Option<&ObjectSchema> {
        match self {
            PropertySchema::Embedded(schema) => Some(schema),
            _ => None,
        }
    }
}

impl Serialize for PropertySchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropertySchema::Scalar(json_type) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("type", json_type)?;
                map.end()
            }
            PropertySchema::Json => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", &JsonType::Object)?;
                map.serialize_entry("additionalProperties", &true)?;
                map.end()
            }
            PropertySchema::Embedded(schema) => schema.serialize(serializer),
            PropertySchema::Array(items) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", &JsonType::Array)?;
                map.serialize_entry("items", items)?;
                map.end()
            }
            PropertySchema::FileUpload { annotation_key } => {
                let mut annotation = IndexMap::new();
                annotation.insert("type", "file");
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", &JsonType::Object)?;
                map.serialize_entry(annotation_key, &annotation)?;
                map.end()
            }
        }
    }
}

/// An object schema view: `$id`, `type: object`, `properties`, optional `required`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectSchema {
    #[serde(rename = "$id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub schema_type: JsonType,
    pub properties: IndexMap<String, PropertySchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl ObjectSchema {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            schema_type: JsonType::Object,
            properties: IndexMap::new(),
            required: None,
        }
    }

    /// Same schema without `$id`, for embedding into another document
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    pub fn property(&self, name: &str) -> Option<&PropertySchema> {
        self.properties.get(name)
    }

    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// Shared error response document registered next to model schemas
pub fn error_response_schema() -> ObjectSchema {
    let mut schema = ObjectSchema::new("ErrorResponse");
    schema.properties.insert("statusCode".to_string(), PropertySchema::Scalar(JsonType::Number));
    schema.properties.insert("error".to_string(), PropertySchema::Scalar(JsonType::String));
    schema.properties.insert("message".to_string(), PropertySchema::Scalar(JsonType::String));
    schema
}
