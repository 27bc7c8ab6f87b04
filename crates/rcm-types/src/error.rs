//! Error types for the record model crate.

use std::io;
use std::path::PathBuf;

/// Errors from parsing, reading, or writing record collections.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// I/O failure on a collection file.
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The collection file is not a valid JSON array of records.
    #[error("failed parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing a collection to JSON failed.
    #[error("failed encoding records: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Result alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
