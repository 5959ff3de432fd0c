//! Hand-off to the persistence layer
//!
//! The compiler never runs queries. It produces an [`EntitySchema`] per model and
//! asks a [`PersistenceLayer`] for a [`Repository`] handle built from it.

use crate::schema::{ColumnDescriptor, RelationDescriptor};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Entity options declared next to a model schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RepoOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synchronize: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<IndexMap<String, SortOrder>>,
}

impl RepoOptions {
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }
}

/// Everything the persistence layer needs to materialize one entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySchema {
    pub name: String,
    pub columns: IndexMap<String, ColumnDescriptor>,
    pub relations: IndexMap<String, RelationDescriptor>,
    #[serde(flatten)]
    pub options: RepoOptions,
}

/// Queryable handle returned by the persistence layer
pub trait Repository: Send + Sync + Debug {
    /// Name of the entity this repository serves
    fn entity_name(&self) -> &str;
}

/// Builds repositories from compiled entity schemas
pub trait PersistenceLayer {
    fn repository(&self, entity: &EntitySchema) -> anyhow::Result<Arc<dyn Repository>>;
}
