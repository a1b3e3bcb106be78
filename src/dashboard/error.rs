//! Dashboard error types

use thiserror::Error;

/// Errors raised while dispatching an event to its callbacks
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A handler could not read the table
    #[error("Dataset error: {0}")]
    Dataset(#[from] crate::dataset::DatasetError),

    /// Nothing is bound to the event's input
    #[error("No callback bound to {id}.{property}")]
    NoCallback { id: String, property: String },

    /// A handler returned the wrong number of values
    #[error("Callback {callback} returned {actual} values for {expected} outputs")]
    OutputArity {
        callback: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
