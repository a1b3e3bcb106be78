//! Column-oriented record table
//!
//! - `Column`: one named column with its inferred type
//! - `ColumnData`: typed storage, missing cells are `None`
//! - `RecordTable`: the immutable table shared by every handler

use serde::Serialize;

use super::error::{DatasetError, DatasetResult};

/// Cell values read as missing, on top of empty cells
pub const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a raw cell counts as missing
pub fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || NA_TOKENS.contains(&cell)
}

/// Type inferred for a column at load time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Integer,
    Float,
    Text,
}

/// Typed cell storage for one column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Integer(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    /// Infer the narrowest type that fits every present cell.
    ///
    /// Integer if all cells parse as `i64`, float if all parse as `f64`,
    /// text otherwise. Empty cells and [`NA_TOKENS`] are missing and don't vote.
    pub fn infer(cells: Vec<String>) -> Self {
        let present = || cells.iter().map(|c| c.trim()).filter(|c| !is_missing(c));

        if present().all(|c| c.parse::<i64>().is_ok()) {
            return ColumnData::Integer(
                cells.iter().map(|c| c.trim().parse::<i64>().ok()).collect(),
            );
        }

        if present().all(|c| c.parse::<f64>().is_ok()) {
            return ColumnData::Float(
                cells
                    .iter()
                    .map(|c| c.trim())
                    .map(|c| if is_missing(c) { None } else { c.parse::<f64>().ok() })
                    .collect(),
            );
        }

        ColumnData::Text(
            cells
                .into_iter()
                .map(|c| if is_missing(&c) { None } else { Some(c) })
                .collect(),
        )
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnData::Integer(_) => ColumnType::Integer,
            ColumnData::Float(_) => ColumnType::Float,
            ColumnData::Text(_) => ColumnType::Text,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Integer(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named column of the record table
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn column_type(&self) -> ColumnType {
        self.data.column_type()
    }

    /// Numeric view of the column, skipping missing cells.
    ///
    /// Returns `None` for text columns.
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        match &self.data {
            ColumnData::Integer(v) => Some(v.iter().flatten().map(|&x| x as f64).collect()),
            ColumnData::Float(v) => Some(v.iter().flatten().copied().collect()),
            ColumnData::Text(_) => None,
        }
    }

    /// Per-row category labels, for grouping and categorical binning.
    pub fn labels(&self) -> Vec<Option<String>> {
        match &self.data {
            ColumnData::Integer(v) => v.iter().map(|x| x.map(|x| x.to_string())).collect(),
            ColumnData::Float(v) => v.iter().map(|x| x.map(|x| x.to_string())).collect(),
            ColumnData::Text(v) => v.clone(),
        }
    }

    /// Per-row numeric values, keeping missing cells as `None`.
    pub fn numeric_rows(&self) -> Option<Vec<Option<f64>>> {
        match &self.data {
            ColumnData::Integer(v) => Some(v.iter().map(|x| x.map(|x| x as f64)).collect()),
            ColumnData::Float(v) => Some(v.clone()),
            ColumnData::Text(_) => None,
        }
    }
}

/// In-memory, column-oriented table of encounter records.
///
/// Built once by the loader and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable {
    columns: Vec<Column>,
    row_count: usize,
}

impl RecordTable {
    /// Build a table from columns of equal length.
    pub fn new(columns: Vec<Column>) -> Self {
        let row_count = columns.first().map(|c| c.data.len()).unwrap_or(0);
        debug_assert!(columns.iter().all(|c| c.data.len() == row_count));
        Self { columns, row_count }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> DatasetResult<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| DatasetError::ColumnNotFound(name.to_string()))
    }
}
