//! Prelude module for convenient imports.
//!
//! ```rust
//! use schemata_core::prelude::*;
//! ```

// === Declarations ===
pub use crate::schema::{
    Cascade, CascadeOperation, ColumnDeclaration, FieldDeclaration, Generated, GenerationStrategy,
    LogicalType, ModelSchema, RelationDeclaration, RelationKind,
};

// === Models and registry ===
pub use crate::global::{get_all_models, get_model, register_model, reset_registry, with_registry};
pub use crate::manifest::ModelManifest;
pub use crate::model::Model;
pub use crate::persistence::{EntitySchema, PersistenceLayer, RepoOptions, Repository, SortOrder};
pub use crate::registry::ModelRegistry;

// === Views ===
pub use crate::view::{
    error_response_schema, FormKind, ObjectSchema, PropertySchema, SchemaGenerator, ViewKind,
};

// === Configuration ===
pub use crate::config::{SchemaConfig, SchemataConfig};
pub use crate::logging::{init_logging, LoggingConfig};

// === Errors ===
pub use crate::error::{SchemaError, SchemaResult};
