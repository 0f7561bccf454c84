//! Catalog error types.
//!
//! Errors from template loading carry the file path so a broken template
//! file can be found without a debugger.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or querying a template catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A template file was not found.
    #[error("template file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// YAML parsing failed.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing failed.
    #[error("failed to parse JSON at {path}: {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A template failed structural validation.
    #[error("invalid template {id}: {reason}")]
    InvalidTemplate { id: String, reason: String },

    /// A template with the same id is already in the catalog.
    #[error("duplicate template id: {id}")]
    DuplicateTemplate { id: String },

    /// No template matches the requested id or title.
    #[error("unknown template: {query:?}")]
    UnknownTemplate { query: String },

    /// More than one template matches a prefix query.
    #[error("ambiguous template {query:?}: matches {}", candidates.join(", "))]
    AmbiguousTemplate {
        query: String,
        candidates: Vec<String>,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for catalog results.
pub type CatalogResult<T> = Result<T, CatalogError>;
