//! Error types for schema loading and conversion.

use std::path::PathBuf;

use fwconv_model::SchemaValidationError;
use thiserror::Error;

/// Errors that can occur while loading, converting, or exporting schemas.
#[derive(Debug, Error)]
pub enum SchemaError {
    // === Document Errors ===
    /// The document does not parse as a mapping holding a `fields` sequence.
    #[error("malformed schema {source_name}: {reason}")]
    Format { source_name: String, reason: String },

    /// The document parsed but one or more field definitions are invalid.
    #[error("invalid schema {source_name}: {error}")]
    Validation {
        source_name: String,
        #[source]
        error: SchemaValidationError,
    },

    /// Failed to parse a CSV layout.
    #[error("failed to parse CSV layout {source_name}: {source}")]
    CsvParse {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    /// Failed to render a schema as YAML or CSV.
    #[error("failed to serialize schema: {reason}")]
    Serialize { reason: String },

    // === File System Errors ===
    /// Failed to read a schema or layout file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a schema or template file.
    #[error("failed to write file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A destination directory could not be created.
    #[error("cannot prepare directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SchemaError {
    /// The aggregated violations, when this is a validation failure.
    pub fn validation(&self) -> Option<&SchemaValidationError> {
        match self {
            Self::Validation { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
