use super::{describe, load_registry, to_json};
use std::path::Path;

/// Render the normalized entity of `model`, as handed to a persistence layer.
pub fn run(manifest: &Path, model: &str) -> Result<String, String> {
    let registry = load_registry(manifest)?;
    let model = registry.get(model).map_err(|e| describe(&e))?;
    let entity = model.entity_schema().map_err(|e| describe(&e))?;
    to_json(&entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{manifest, LIBRARY};

    #[test]
    fn entity_has_injected_id() {
        let file = manifest(LIBRARY);
        let output = run(file.path(), "Book").unwrap();
        let entity: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(entity["name"], "Book");
        assert_eq!(entity["columns"]["id"]["primary"], true);
        assert_eq!(entity["columns"]["scan"]["type"], "simple-json");
        assert_eq!(entity["relations"]["author"]["target"], "Author");
    }

    #[test]
    fn invalid_declaration_is_explained() {
        let file = manifest("[models.Broken.fields]\nid = \"integer\"");
        let err = run(file.path(), "Broken").unwrap_err();
        assert!(err.contains("Example:"));
    }
}
