pub mod check;
pub mod entity;
pub mod schema;

use schemata_core::manifest::ModelManifest;
use schemata_core::{ModelRegistry, SchemaError};
use std::path::Path;

/// Read a manifest and register all of its models.
pub fn load_registry(manifest: &Path) -> Result<ModelRegistry, String> {
    let manifest = ModelManifest::from_path(manifest).map_err(|e| format!("{e:#}"))?;
    manifest.into_registry().map_err(|e| describe(&e))
}

/// Cause, explanation and, when available, a corrected declaration.
pub fn describe(err: &SchemaError) -> String {
    let mut text = format!("{}\n  {}", err.cause(), err.explanation());
    if let Some(example) = err.example() {
        text.push_str("\n  Example:");
        for line in example.lines() {
            text.push_str("\n    ");
            text.push_str(line);
        }
    }
    text
}

pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("failed to render JSON: {}", e))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::Write;

    pub const LIBRARY: &str = r#"
[models.Author.fields]
name = "string"
books = { type = "one-to-many", target = "Book", cascade = ["insert"] }

[models.Book.fields]
title = "string"
scan = "file"
author = { type = "many-to-one", target = "Author", eager = true }
"#;

    pub fn manifest(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }
}
