//! # Staydash
//!
//! Hospital Stay Dashboard - a single-page web dashboard of linked histograms
//! over diabetic patient encounter records.
//!
//! ## Features
//!
//! - **One-shot load**: the encounter CSV is read once, typed per column, and never mutated
//! - **Declarative layout**: the page is a static component tree, served as HTML and JSON
//! - **Reactive charts**: a dropdown change re-runs three pure chart handlers
//! - **Renderer-independent charts**: handlers return binned, styled chart specs as JSON
//!
//! ## Modules
//!
//! - [`dataset`]: CSV loading and the column-oriented record table
//! - [`chart`]: histogram binning and chart specifications
//! - [`dashboard`]: layout, dropdown variables, handlers and event dispatch
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use staydash::dashboard::selected_variable_chart;
//! use staydash::dataset::{CsvLoader, REQUIRED_COLUMNS};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = CsvLoader::new()
//!         .require(REQUIRED_COLUMNS)
//!         .load(Path::new("encounters.csv"))?;
//!
//!     let (chart, subtitle) = selected_variable_chart(&dataset.table, "age")?;
//!     println!("{}: {} bins", subtitle, chart.binning.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod dataset;

// Re-export top-level types for convenience
pub use dataset::{
    Column, ColumnData, ColumnType, CsvLoader, Dataset, DatasetError, DatasetResult,
    DatasetSummary, RecordTable, REQUIRED_COLUMNS,
};

pub use chart::{BarMode, BinRule, Binning, ChartSpec, Histogram, HistogramBuilder};

pub use dashboard::{
    build_layout, humanize, readmission_chart, selected_variable_chart, time_in_hospital_chart,
    variable_color, Component, DashboardError, DispatchTable, InputEvent, Output, OutputValue,
    Variable, DEFAULT_COLOR,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, DatasetConfig, LoggingConfig, ServerConfig};
