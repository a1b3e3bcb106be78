//! CSV loader
//!
//! Reads the encounter file into a [`RecordTable`] once at startup.
//! Any problem with the file is fatal; there is no partial load.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::error::{DatasetError, DatasetResult};
use super::table::{Column, ColumnData, ColumnType, RecordTable};

/// A loaded record table together with where and when it came from
#[derive(Debug)]
pub struct Dataset {
    pub path: PathBuf,
    pub table: RecordTable,
    pub loaded_at: DateTime<Utc>,
}

/// Serializable overview of a loaded dataset
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub path: String,
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Dataset {
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            path: self.path.display().to_string(),
            rows: self.table.row_count(),
            columns: self
                .table
                .columns()
                .iter()
                .map(|c| ColumnSummary {
                    name: c.name.clone(),
                    column_type: c.column_type(),
                })
                .collect(),
            loaded_at: self.loaded_at,
        }
    }
}

/// CSV loader with a list of columns that must be present
pub struct CsvLoader {
    delimiter: u8,
    required: Vec<String>,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvLoader {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            required: Vec::new(),
        }
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Require a set of columns to exist in the header
    pub fn require<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Load a dataset from a file
    pub fn load(&self, path: &Path) -> DatasetResult<Dataset> {
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let table = self.read_table(file, path)?;

        tracing::info!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.columns().len(),
            "Loaded dataset"
        );

        Ok(Dataset {
            path: path.to_path_buf(),
            table,
            loaded_at: Utc::now(),
        })
    }

    /// Load a table from an in-memory CSV string (useful for testing)
    pub fn load_str(&self, csv_data: &str) -> DatasetResult<RecordTable> {
        self.read_table(csv_data.as_bytes(), Path::new("<memory>"))
    }

    fn read_table<R: Read>(&self, source: R, path: &Path) -> DatasetResult<RecordTable> {
        let malformed = |source: csv::Error| DatasetError::Malformed {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .delimiter(self.delimiter)
            .from_reader(source);

        let headers = reader.headers().map_err(malformed)?.clone();
        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(DatasetError::EmptyHeader(path.to_path_buf()));
        }

        let names: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();

        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(DatasetError::DuplicateColumn {
                    path: path.to_path_buf(),
                    column: name.clone(),
                });
            }
        }

        if let Some(missing) = self.required.iter().find(|r| !seen.contains(r.as_str())) {
            return Err(DatasetError::MissingColumn {
                path: path.to_path_buf(),
                column: missing.clone(),
            });
        }

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); names.len()];
        for result in reader.records() {
            let record = result.map_err(malformed)?;
            for (idx, value) in record.iter().enumerate() {
                cells[idx].push(value.to_string());
            }
        }

        let columns = names
            .into_iter()
            .zip(cells)
            .map(|(name, values)| Column::new(name, ColumnData::infer(values)))
            .collect();

        Ok(RecordTable::new(columns))
    }
}
