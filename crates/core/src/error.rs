//! Error types for ragbench.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: configuration, I/O, upstream model services, the
//! knowledge pipeline, prompts and evaluation.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for ragbench.
///
/// All fallible functions return `Result<T, AppError>`.
/// We never panic; errors are represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or invalid configuration (unknown backend, missing credentials, bad sizes)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific file or directory
    #[error("I/O error at {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Embedding or generation call failed (network, auth, model)
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Corpus, index and pipeline errors
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Batch-level evaluation errors
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Attach a path to an I/O error.
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Whether this error originates from the filesystem.
    pub fn is_io(&self) -> bool {
        matches!(self, AppError::Io(_) | AppError::FileAccess { .. })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
