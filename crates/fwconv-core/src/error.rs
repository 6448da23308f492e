//! Error types for file processing.

use std::path::PathBuf;

use fwconv_schema::SchemaError;
use thiserror::Error;

/// Errors that can occur while converting a fixed-width file.
///
/// An input that cannot be used as text is reported in two ways:
/// [`ProcessError::FileFormat`] when its content is not UTF-8 text (or lacks a
/// required administration header), and [`ProcessError::FileRead`] when the
/// file cannot be opened or read at all.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// No schema could be selected unambiguously for the input.
    #[error("cannot resolve schema for {input}: {reason}")]
    SchemaResolution { input: PathBuf, reason: String },

    /// The input content is not usable text: undecodable bytes, a UTF-16
    /// encoding, or a missing administration header.
    #[error("input {path} is not valid text: {reason}")]
    FileFormat { path: PathBuf, reason: String },

    /// The input could not be opened or read (missing file, permissions,
    /// I/O failure).
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema selects no fields, so the output would have no columns.
    #[error("schema {schema} keeps no fields; nothing to convert")]
    NoOutputColumns { schema: PathBuf },

    /// The selected schema failed to load.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Failed to write the CSV output.
    #[error("failed to write output {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for processing operations.
pub type Result<T> = std::result::Result<T, ProcessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProcessError::SchemaResolution {
            input: PathBuf::from("data/SF_0524.txt"),
            reason: "no schema files found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot resolve schema for data/SF_0524.txt: no schema files found"
        );
    }

    #[test]
    fn test_error_from_schema_error() {
        let err: ProcessError = SchemaError::Serialize {
            reason: "boom".to_string(),
        }
        .into();
        assert!(matches!(err, ProcessError::Schema(_)));
        assert_eq!(err.to_string(), "failed to serialize schema: boom");
    }
}
