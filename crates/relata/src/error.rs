//! Error types for the Relata library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for schema operations.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Schema was set up with no way to ever obtain attributes.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Lookup of an attribute name that was never declared.
    #[error("unknown attribute '{name}'")]
    UnknownAttribute { name: String },

    /// Inference invoked on a schema whose attributes are already populated.
    #[error("schema is already defined; inference can run at most once")]
    AlreadyDefined,

    /// Error reading or accessing a dataset file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Dataset with no columns to describe.
    #[error("empty data: {0}")]
    EmptyData(String),

    /// Failure reported by an inference strategy.
    #[error("inference error: {0}")]
    Inference(String),
}

/// Result type alias for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
