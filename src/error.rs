//! Error types for annotation loading and statistics.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, AnnotationError>;

/// Annotation-related errors
///
/// Every variant is a caller-input error; nothing here is retryable.
#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("No annotations found with category {category}")]
    EmptyResult { category: String },

    #[error("Annotations should be for at most one filename (mixed filename)")]
    MixedFilename,

    #[error("Annotations should be for at most one category (mixed category)")]
    MixedCategory,

    #[error("Unknown filename {filename:?} in {table}")]
    UnknownFilename { filename: String, table: &'static str },

    #[error("Statistics requested over an empty annotation store")]
    EmptyStore,

    #[error("Frame counts sum to zero frames")]
    NoFrames,

    #[error("Malformed line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnnotationError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnnotationError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for AnnotationError {
    fn from(err: config::ConfigError) -> Self {
        AnnotationError::Config(err.to_string())
    }
}
