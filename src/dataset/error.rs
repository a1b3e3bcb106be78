//! Dataset error types
//!
//! Defines all errors that can occur while loading or reading the record table.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the dataset layer
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The input file could not be opened or read
    #[error("Failed to read dataset {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the input (ragged rows, bad UTF-8, ...)
    #[error("Malformed dataset {path:?}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The header row is absent or has no columns
    #[error("Dataset {0:?} has no header row")]
    EmptyHeader(PathBuf),

    /// The header names the same column twice
    #[error("Dataset {path:?} has duplicate column: {column}")]
    DuplicateColumn { path: PathBuf, column: String },

    /// A column the dashboard needs is absent from the file
    #[error("Dataset {path:?} is missing required column: {column}")]
    MissingColumn { path: PathBuf, column: String },

    /// A lookup named a column the table does not have
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;
