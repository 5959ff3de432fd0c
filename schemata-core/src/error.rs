//! Authoring-time errors raised while compiling model schemas
//!
//! Every variant is a developer mistake rather than a transient condition, so
//! none of them is retryable. Besides the short cause (the `Display` text),
//! each error carries an explanation and, where it helps, a corrected
//! declaration to copy from.

/// Result alias used throughout the compiler
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors produced by normalization, registration and view generation
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("model '{model}' declares '{field}' as a second primary column")]
    MultiplePrimaryKeys { model: String, field: String },

    #[error("relation '{field}' on model '{model}' must use the full declaration")]
    InlineRelationNotSupported { model: String, field: String },

    #[error("relation '{field}' on model '{model}' has a target that is not a model name")]
    UnsupportedRelationTarget { model: String, field: String },

    #[error("model name '{0}' has already been registered")]
    DuplicateModelName(String),

    #[error("model '{0}' is not registered")]
    UnknownModelReference(String),

    #[error("repository for model '{0}' requested before it was attached")]
    RepoNotReady(String),

    #[error("schema expansion exceeded depth {limit} at '{path}'")]
    RecursionLimitExceeded { limit: usize, path: String },
}

impl SchemaError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::MultiplePrimaryKeys { .. } => "multiple_primary_keys",
            SchemaError::InlineRelationNotSupported { .. } => "inline_relation_not_supported",
            SchemaError::UnsupportedRelationTarget { .. } => "unsupported_relation_target",
            SchemaError::DuplicateModelName(_) => "duplicate_model_name",
            SchemaError::UnknownModelReference(_) => "unknown_model_reference",
            SchemaError::RepoNotReady(_) => "repo_not_ready",
            SchemaError::RecursionLimitExceeded { .. } => "recursion_limit_exceeded",
        }
    }

    /// Short summary of what went wrong
    pub fn cause(&self) -> String {
        self.to_string()
    }

    /// Why the declaration is rejected
    pub fn explanation(&self) -> String {
        match self {
            SchemaError::MultiplePrimaryKeys { .. } => "A primary 'id' column is created for every model. \
                 Composite primary keys are not supported, so no other column may be primary."
                .to_string(),
            SchemaError::InlineRelationNotSupported { .. } => {
                "Relations need a target model and cascade metadata to build the entity, \
                 which a bare relation kind cannot carry."
                    .to_string()
            }
            SchemaError::UnsupportedRelationTarget { .. } => {
                "Relation targets are resolved by name through the model registry; \
                 function or reference targets are not supported."
                    .to_string()
            }
            SchemaError::DuplicateModelName(name) => format!(
                "Each model needs a unique name. A model named '{name}' already exists in this registry."
            ),
            SchemaError::UnknownModelReference(name) => format!(
                "Models are looked up by the name they were registered with. \
                 Make sure '{name}' is registered before any schema is requested."
            ),
            SchemaError::RepoNotReady(_) => {
                "The repository is attached after entities are created (post-init), \
                 so it can only be used from that phase onwards."
                    .to_string()
            }
            SchemaError::RecursionLimitExceeded { .. } => {
                "Related models embed each other through cascade or eager relations. \
                 Break the cycle or raise schema.max_depth."
                    .to_string()
            }
        }
    }

    /// Corrected declaration, when there is one worth showing
    pub fn example(&self) -> Option<String> {
        match self {
            SchemaError::MultiplePrimaryKeys { field, .. } => Some(format!(
                "[models.Example.fields]\n{field} = {{ type = \"string\", unique = true }}  # instead of primary = true"
            )),
            SchemaError::InlineRelationNotSupported { field, .. } => Some(format!(
                "# Replace\n{field} = \"one-to-one\"\n# with\n{field} = {{ type = \"one-to-one\", target = \"Detail\", joinColumn = true }}"
            )),
            SchemaError::UnsupportedRelationTarget { field, .. } => {
                Some(format!("{field} = {{ type = \"many-to-one\", target = \"Author\" }}"))
            }
            SchemaError::RepoNotReady(name) => Some(format!(
                "let model = registry.get(\"{name}\")?;\nmodel.attach_repository(&persistence)?;\nlet repo = model.repository()?;"
            )),
            SchemaError::DuplicateModelName(_)
            | SchemaError::UnknownModelReference(_)
            | SchemaError::RecursionLimitExceeded { .. } => None,
        }
    }
}
