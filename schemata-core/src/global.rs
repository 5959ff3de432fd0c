//! Process-wide default registry
//!
//! Convenience for bootstrap code that defines models in independent modules.
//! Libraries should prefer passing a [`ModelRegistry`] explicitly. Tests must call
//! [`reset_registry`] first since nothing else tears this state down.

use crate::error::SchemaResult;
use crate::model::Model;
use crate::registry::ModelRegistry;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use std::sync::{Arc, PoisonError, RwLock};

lazy_static! {
    static ref REGISTRY: RwLock<ModelRegistry> = RwLock::new(ModelRegistry::new());
}

pub fn register_model(model: Model) -> SchemaResult<Arc<Model>> {
    REGISTRY.write().unwrap_or_else(PoisonError::into_inner).register(model)
}

pub fn get_model(name: &str) -> SchemaResult<Arc<Model>> {
    REGISTRY.read().unwrap_or_else(PoisonError::into_inner).get(name)
}

pub fn get_all_models() -> IndexMap<String, Arc<Model>> {
    REGISTRY.read().unwrap_or_else(PoisonError::into_inner).all().clone()
}

pub fn reset_registry() {
    REGISTRY.write().unwrap_or_else(PoisonError::into_inner).reset();
}

/// Run `f` against the process-wide registry, e.g. to generate schema views
///
/// The read lock is held while `f` runs: calling [`register_model`] or
/// [`reset_registry`] from inside `f` deadlocks.
pub fn with_registry<R>(f: impl FnOnce(&ModelRegistry) -> R) -> R {
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    f(&registry)
}
