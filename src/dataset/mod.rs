//! Encounter Dataset
//!
//! Loads the patient encounter file into an immutable, column-oriented table:
//!
//! - **table**: `RecordTable`, `Column` and type inference
//! - **loader**: CSV reading with required-column checks
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use staydash::dataset::{CsvLoader, REQUIRED_COLUMNS};
//! use std::path::Path;
//!
//! let dataset = CsvLoader::new()
//!     .require(REQUIRED_COLUMNS)
//!     .load(Path::new("encounters.csv"))?;
//!
//! println!("{} rows", dataset.table.row_count());
//! # Ok::<(), staydash::dataset::DatasetError>(())
//! ```

pub mod error;
pub mod loader;
pub mod table;

pub use error::{DatasetError, DatasetResult};
pub use loader::{ColumnSummary, CsvLoader, Dataset, DatasetSummary};
pub use table::{is_missing, Column, ColumnData, ColumnType, RecordTable, NA_TOKENS};

/// Length of stay in days
pub const TIME_IN_HOSPITAL: &str = "time_in_hospital";

/// Readmission status category
pub const READMITTED: &str = "readmitted";

/// Columns the dashboard reads; the loader refuses files without them
pub const REQUIRED_COLUMNS: [&str; 10] = [
    TIME_IN_HOSPITAL,
    READMITTED,
    "num_lab_procedures",
    "number_diagnoses",
    "num_medications",
    "discharge_disposition_id",
    "number_outpatient",
    "age",
    "number_emergency",
    "num_procedures",
];
