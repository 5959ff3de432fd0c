//! Schemata CLI — inspect model manifests and the schemas generated from them.
//!
//! ```bash
//! schemata schema models.toml Book --view create
//! schemata entity models.toml Book
//! schemata check models.toml
//! ```
//!
//! See `schemata --help` for all available commands and options.

mod commands;

use clap::{Parser, Subcommand};
use commands::schema::ViewArg;
use schemata_core::config::SchemataConfig;
use schemata_core::logging::init_logging;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "schemata", about = "Declarative model schema compiler", version)]
struct Cli {
    /// Configuration file (defaults to ./schemata.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one JSON Schema view of a model
    Schema {
        /// Model manifest (.toml or .json)
        manifest: PathBuf,

        /// Model name
        model: String,

        #[arg(long, value_enum, default_value_t = ViewArg::Create)]
        view: ViewArg,

        /// Prefix for the generated `$id`
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Print the normalized entity definition of a model
    Entity {
        /// Model manifest (.toml or .json)
        manifest: PathBuf,

        /// Model name
        model: String,
    },
    /// Normalize every model and generate all of its views
    Check {
        /// Model manifest (.toml or .json)
        manifest: PathBuf,
    },
}

/// An explicit `--config` must exist; the default `schemata.toml` is optional.
fn load_config(path: Option<&Path>) -> Result<SchemataConfig, String> {
    let config = match path {
        Some(path) => SchemataConfig::from_file(path).map(|mut config| {
            config.apply_env_vars();
            config
        }),
        None => SchemataConfig::load(),
    }
    .map_err(|e| format!("{e:#}"))?;
    config.validate().map_err(|e| format!("invalid configuration: {e:#}"))?;
    Ok(config)
}

fn run(cli: Cli) -> Result<String, String> {
    let config = load_config(cli.config.as_deref())?;
    let logging = config.logging.runtime().map_err(|e| e.to_string())?;
    if let Err(e) = init_logging(&logging) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    match cli.command {
        Commands::Schema { manifest, model, view, prefix } => {
            commands::schema::run(&manifest, &model, view, prefix.as_deref(), &config.schema)
        }
        Commands::Entity { manifest, model } => commands::entity::run(&manifest, &model),
        Commands::Check { manifest } => commands::check::run(&manifest, &config.schema),
    }
}

fn main() {
    match run(Cli::parse()) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn explicit_config_must_exist() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load_config(Some(&tmp.path().join("schemata-typo.toml"))).unwrap_err();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn explicit_config_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[schema]\nfile_annotation_key = \"x-upload\"").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.schema.file_annotation_key, "x-upload");
    }

    #[test]
    fn invalid_explicit_config_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[schema]\nmax_depth = 0").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.starts_with("invalid configuration"));
    }
}
