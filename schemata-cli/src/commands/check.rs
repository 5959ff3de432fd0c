use super::{describe, load_registry};
use schemata_core::config::SchemaConfig;
use schemata_core::view::{FormKind, SchemaGenerator, ViewKind};
use schemata_core::{Model, SchemaResult};
use std::path::Path;

fn check_model(generator: &SchemaGenerator<'_>, model: &Model) -> SchemaResult<()> {
    model.definition()?;
    for kind in [ViewKind::Create, ViewKind::Update, ViewKind::Full] {
        generator.view(kind, model, None)?;
    }
    for kind in [FormKind::Create, FormKind::Update] {
        generator.form_view(kind, model, None)?;
    }
    Ok(())
}

/// Normalize every model in the manifest and generate each of its views.
pub fn run(manifest: &Path, config: &SchemaConfig) -> Result<String, String> {
    let registry = load_registry(manifest)?;
    let generator = SchemaGenerator::new(&registry).with_config(config.clone());

    let mut failures = Vec::new();
    for (name, model) in registry.all() {
        match check_model(&generator, model) {
            Ok(()) => log::info!("Model '{}' ok", name),
            Err(e) => failures.push(format!("{}: {}", name, describe(&e))),
        }
    }

    if failures.is_empty() {
        Ok(format!("{} models ok", registry.len()))
    } else {
        Err(format!("{} of {} models failed\n{}", failures.len(), registry.len(), failures.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{manifest, LIBRARY};

    #[test]
    fn valid_manifest_passes() {
        let file = manifest(LIBRARY);
        assert_eq!(run(file.path(), &SchemaConfig::default()).unwrap(), "2 models ok");
    }

    #[test]
    fn reports_every_failing_model() {
        let file = manifest(
            r#"
[models.Good.fields]
name = "string"

[models.Inline.fields]
detail = "one-to-one"

[models.Dangling.fields]
owner = { type = "many-to-one", target = "Nobody", eager = true }
"#,
        );
        let err = run(file.path(), &SchemaConfig::default()).unwrap_err();
        assert!(err.starts_with("2 of 3 models failed"));
        assert!(err.contains("Inline: "));
        assert!(err.contains("Dangling: model 'Nobody' is not registered"));
        assert!(!err.contains("Good: "));
    }

    #[test]
    fn depth_limit_is_applied() {
        let file = manifest(
            r#"
[models.Node.fields]
parent = { type = "many-to-one", target = "Node", eager = true }
"#,
        );
        let config = SchemaConfig { max_depth: Some(2), ..SchemaConfig::default() };
        let err = run(file.path(), &config).unwrap_err();
        assert!(err.contains("Node -> Node -> Node"));
    }

    #[test]
    fn unreadable_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&dir.path().join("missing.toml"), &SchemaConfig::default()).unwrap_err();
        assert!(err.contains("Failed to read manifest"));
    }
}
