//! Histogram charts
//!
//! - **histogram**: binning of numeric and categorical columns
//! - **spec**: the serializable chart description and its builder

pub mod histogram;
pub mod spec;

pub use histogram::{BinRule, Binning, Histogram};
pub use spec::{
    BarMode, ChartKind, ChartLayout, ChartSpec, DataSource, HistogramBuilder, MarkerLine, Trace,
};
