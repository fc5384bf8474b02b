//! Error types for the docpath library
//!
//! Queries never fail loudly: a missing node is reported through the
//! configured not-found marker (see [`crate::core::Document`]). The errors
//! here cover the fallible outer surfaces instead: parsing text, reading and
//! writing files, and the strict lookup API.

use std::path::PathBuf;
use thiserror::Error;

use crate::core::path::LookupError;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum DocPathError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File not found or not a regular file
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The file extension does not name a supported document format
    #[error("Unsupported document format: {path} (expected .json, .yaml or .yml)")]
    UnsupportedFormat { path: PathBuf },

    /// A YAML mapping key that cannot be used as a map key in the tree
    #[error("Unsupported mapping key: {key}")]
    UnsupportedKey { key: String },

    /// A strict lookup did not find a node
    #[error("Node not found at '{path}': {source}")]
    NotFound {
        path: String,
        #[source]
        source: LookupError,
    },

    /// Persisting a temporary file over its target failed
    #[error("Failed to persist {path}: {reason}")]
    Persist { path: PathBuf, reason: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DocPathError>;

impl DocPathError {
    /// Create a new file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new unsupported format error
    pub fn unsupported_format(path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedFormat { path: path.into() }
    }

    /// Create a new unsupported key error
    pub fn unsupported_key(key: impl Into<String>) -> Self {
        Self::UnsupportedKey { key: key.into() }
    }

    /// Create a new not found error for a lookup failure
    pub fn not_found(path: impl Into<String>, source: LookupError) -> Self {
        Self::NotFound {
            path: path.into(),
            source,
        }
    }

    /// Check whether the error comes from the content of a document rather
    /// than from the environment
    pub fn is_content_error(&self) -> bool {
        match self {
            Self::Json(_) | Self::Yaml(_) | Self::UnsupportedKey { .. } | Self::NotFound { .. } => {
                true
            }
            Self::Io(_)
            | Self::FileNotFound { .. }
            | Self::UnsupportedFormat { .. }
            | Self::Persist { .. } => false,
        }
    }
}
