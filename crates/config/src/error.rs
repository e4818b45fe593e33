//! Error types for environment loading and validation.
//!
//! Responsibilities:
//! - Define the fatal error taxonomy surfaced by `create_schema` and friends.
//! - Render human-readable messages naming the key, raw value and expectation.
//!
//! Does NOT handle:
//! - Per-line parse problems (see `parser::ParseIssue`, which is never fatal).
//! - Per-field validator outcomes (see `schema::ValidationIssue`).
//!
//! Invariants:
//! - Every variant carries enough context (key, path) to act on it.
//! - I/O errors while reading a file that exists are always fatal.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while building or querying an environment manager.
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("Environment file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("No environment file found (tried: {})", display_paths(candidates))]
    NoEnvFileFound { candidates: Vec<PathBuf> },

    #[error("Failed to read environment file at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to determine working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),

    #[error("Missing required environment variable: \"{key}\"")]
    MissingRequired { key: String },

    #[error("{key} Expected type {expected}, \"{value}\" is of type {found}")]
    WrongType {
        key: String,
        value: String,
        expected: String,
        found: String,
    },

    #[error("Invalid schema file {}: {message}", path.display())]
    SchemaFile { path: PathBuf, message: String },

    #[error("Failed to deserialize environment values: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl EnvError {
    /// Returns true for the two validation variants.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EnvError::MissingRequired { .. } | EnvError::WrongType { .. }
        )
    }

    /// Returns true when no candidate env file could be found.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EnvError::FileNotFound { .. } | EnvError::NoEnvFileFound { .. }
        )
    }

    pub(crate) fn schema_file(path: &Path, message: impl Into<String>) -> Self {
        EnvError::SchemaFile {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
