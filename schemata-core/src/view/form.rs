//! Form variants of the create and update views
//!
//! File columns are stored as a reference, so the base views describe them as
//! JSON objects. Form views swap the top-level ones for an upload placeholder.
//! File columns of embedded related models keep their base-view schema.

use super::document::{ObjectSchema, PropertySchema};
use super::generator::{schema_id, FormKind, SchemaGenerator};
use crate::error::SchemaResult;
use crate::model::Model;

impl SchemaGenerator<'_> {
    pub fn form_view(&self, kind: FormKind, model: &Model, prefix: Option<&str>) -> SchemaResult<ObjectSchema> {
        let mut schema = self.view(kind.base(), model, prefix)?;
        schema.id = Some(schema_id(model.name(), kind.label(), prefix));

        let annotation_key = &self.config().file_annotation_key;
        for (name, column) in &model.definition()?.columns {
            if !column.is_file() {
                continue;
            }
            if let Some(property) = schema.properties.get_mut(name) {
                *property = PropertySchema::FileUpload { annotation_key: annotation_key.clone() };
            }
        }

        Ok(schema)
    }

    pub fn form_create_schema(&self, model: &Model, prefix: Option<&str>) -> SchemaResult<ObjectSchema> {
        self.form_view(FormKind::Create, model, prefix)
    }

    pub fn form_update_schema(&self, model: &Model, prefix: Option<&str>) -> SchemaResult<ObjectSchema> {
        self.form_view(FormKind::Update, model, prefix)
    }
}
