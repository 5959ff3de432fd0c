//! Schemata - Core
//!
//! Declarative model schemas compiled into persistence entities and JSON Schema views.
//!
//! # Overview
//!
//! A model is a name plus a [`ModelSchema`]: a map of field names to either a
//! scalar column or a relation to another model. Schemata normalizes that map
//! into an [`EntityDefinition`] with an injected `id` primary key, keeps every
//! model in a [`ModelRegistry`], and derives request/response schemas from it:
//!
//! - create and update views, embedding the related models each relation cascades to
//! - a full view embedding eager relations
//! - form variants where file columns become upload placeholders
//!
//! # Quick Start
//!
//! ```rust
//! use schemata_core::prelude::*;
//!
//! let mut registry = ModelRegistry::new();
//! registry.register(Model::new(
//!     "Author",
//!     ModelSchema::new()
//!         .field("name", LogicalType::String)
//!         .field("books", RelationDeclaration::new(RelationKind::OneToMany, "Book").cascade_all()),
//! ))?;
//! registry.register(Model::new("Book", ModelSchema::new().field("title", LogicalType::String)))?;
//!
//! let author = registry.get("Author")?;
//! let schema = author.create_schema(&registry, None)?;
//! assert_eq!(schema.id.as_deref(), Some("Author_createSchema"));
//! # Ok::<(), SchemaError>(())
//! ```
//!
//! # Architecture
//!
//! - [`schema`] - Field declarations and normalization
//! - [`model`] - Models and their persistence handle
//! - [`registry`] - Model lookup by name ([`global`] for a process-wide instance)
//! - [`view`] - JSON Schema view generation
//! - [`manifest`] - Models declared in TOML or JSON files
//! - [`config`] and [`logging`] - Ambient configuration

pub mod config; // Configuration system with TOML support
pub mod error;
pub mod global;
pub mod logging; // Logging on top of the standard log crate
pub mod manifest;
pub mod model;
pub mod persistence;
pub mod registry;
pub mod schema;
pub mod view;

// Prelude module for convenient imports
pub mod prelude;

pub use error::{SchemaError, SchemaResult};
pub use model::Model;
pub use registry::ModelRegistry;
pub use schema::{normalize, EntityDefinition, ModelSchema};
pub use view::{ObjectSchema, SchemaGenerator};
