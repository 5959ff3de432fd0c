use super::{describe, load_registry, to_json};
use clap::ValueEnum;
use schemata_core::config::SchemaConfig;
use schemata_core::view::{FormKind, SchemaGenerator, ViewKind};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Create,
    Update,
    Full,
    FormCreate,
    FormUpdate,
}

/// Render one view of `model` as pretty-printed JSON.
pub fn run(
    manifest: &Path,
    model: &str,
    view: ViewArg,
    prefix: Option<&str>,
    config: &SchemaConfig,
) -> Result<String, String> {
    let registry = load_registry(manifest)?;
    let model = registry.get(model).map_err(|e| describe(&e))?;
    let generator = SchemaGenerator::new(&registry).with_config(config.clone());

    let schema = match view {
        ViewArg::Create => generator.view(ViewKind::Create, &model, prefix),
        ViewArg::Update => generator.view(ViewKind::Update, &model, prefix),
        ViewArg::Full => generator.view(ViewKind::Full, &model, prefix),
        ViewArg::FormCreate => generator.form_view(FormKind::Create, &model, prefix),
        ViewArg::FormUpdate => generator.form_view(FormKind::Update, &model, prefix),
    }
    .map_err(|e| describe(&e))?;

    to_json(&schema)
}
