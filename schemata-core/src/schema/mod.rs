//! Model schema declarations and their normalization
//!
//! A [`ModelSchema`] is the only thing users author. [`normalize`] turns it into
//! an [`EntityDefinition`]: the injected `id` column, every scalar column with its
//! storage type resolved, and every relation with its target and cascade policy.

pub mod declaration;
pub mod normalize;

pub use declaration::{
    Cascade, CascadeOperation, ColumnDeclaration, ColumnType, FieldDeclaration, Generated,
    GenerationStrategy, LogicalType, ModelSchema, RelationDeclaration, RelationKind,
    RelationTarget,
};
pub use normalize::{
    normalize, ColumnDescriptor, EntityDefinition, RelationDescriptor, StorageType,
    PRIMARY_COLUMN,
};
