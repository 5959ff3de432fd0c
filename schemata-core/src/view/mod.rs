//! JSON Schema views of models
//!
//! - [`ViewKind::Create`]: editable columns, relations cascading inserts, `required`
//! - [`ViewKind::Update`]: editable columns, relations cascading updates
//! - [`ViewKind::Full`]: every column, eager relations
//! - [`FormKind`]: create/update views with top-level file fields as upload placeholders

pub mod document;
mod form;
pub mod generator;

pub use document::{error_response_schema, JsonType, ObjectSchema, PropertySchema};
pub use generator::{json_type_for, schema_id, FormKind, SchemaGenerator, ViewKind};
