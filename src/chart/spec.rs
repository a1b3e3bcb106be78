//! Chart specifications
//!
//! A [`ChartSpec`] is a declarative, renderer-independent description of one
//! histogram: what column it reads, how it was binned, the counts per trace,
//! and the styling/layout the page should apply.

use serde::Serialize;

use super::histogram::{BinRule, Binning, Histogram};
use crate::dataset::{DatasetResult, RecordTable};

/// Geometry of the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Histogram,
}

/// How traces of a grouped chart are arranged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMode {
    /// Bars of different groups stack on top of each other
    #[default]
    Relative,
    /// Bars of different groups sit side by side in each bin
    Group,
}

/// Which columns feed the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSource {
    pub column: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
}

/// One bar series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Counts aligned with the chart's binning
    pub counts: Vec<u64>,
}

/// Bar outline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerLine {
    pub width: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChartLayout {
    pub title: String,
    /// Horizontal title anchor in paper coordinates, 0.5 is centered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_x: Option<f64>,
    pub xaxis_title: String,
    pub yaxis_title: String,
    pub barmode: BarMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bargap: Option<f64>,
}

/// A complete histogram description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub source: DataSource,
    /// Bin count asked for, if any; categorical columns ignore it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_bins: Option<usize>,
    pub binning: Binning,
    pub traces: Vec<Trace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_line: Option<MarkerLine>,
    pub layout: ChartLayout,
}

impl ChartSpec {
    /// Start building a histogram of `column`
    pub fn histogram(column: impl Into<String>) -> HistogramBuilder {
        HistogramBuilder::new(column)
    }

    /// The single trace color of an ungrouped chart
    pub fn color(&self) -> Option<&str> {
        self.traces.first().and_then(|t| t.color.as_deref())
    }
}

/// Builder for histogram chart specifications
#[derive(Debug, Clone)]
pub struct HistogramBuilder {
    column: String,
    group_by: Option<String>,
    bins: BinRule,
    color: Option<String>,
    marker_line: Option<MarkerLine>,
    layout: ChartLayout,
}

impl HistogramBuilder {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            group_by: None,
            bins: BinRule::Auto,
            color: None,
            marker_line: None,
            layout: ChartLayout::default(),
        }
    }

    /// Use exactly `n` uniform bins
    pub fn bins(mut self, n: usize) -> Self {
        self.bins = BinRule::Count(n);
        self
    }

    /// Split into one trace per category of `column`
    pub fn group_by(mut self, column: impl Into<String>) -> Self {
        self.group_by = Some(column.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn outline(mut self, width: f64, color: impl Into<String>) -> Self {
        self.marker_line = Some(MarkerLine {
            width,
            color: color.into(),
        });
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.layout.title = title.into();
        self
    }

    /// Center the title horizontally
    pub fn center_title(mut self) -> Self {
        self.layout.title_x = Some(0.5);
        self
    }

    pub fn axis_titles(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.layout.xaxis_title = x.into();
        self.layout.yaxis_title = y.into();
        self
    }

    pub fn barmode(mut self, mode: BarMode) -> Self {
        self.layout.barmode = mode;
        self
    }

    pub fn bargap(mut self, gap: f64) -> Self {
        self.layout.bargap = Some(gap);
        self
    }

    /// Bin the table and produce the specification.
    ///
    /// Fails if the data or group column does not exist.
    pub fn build(self, table: &RecordTable) -> DatasetResult<ChartSpec> {
        let column = table.column(&self.column)?;

        let histogram = match &self.group_by {
            Some(group) => Histogram::grouped(column, table.column(group)?, self.bins),
            None => Histogram::of(column, self.bins),
        };

        let traces = histogram
            .series
            .into_iter()
            .map(|(name, counts)| Trace {
                name,
                color: self.color.clone(),
                counts,
            })
            .collect();

        let requested_bins = match self.bins {
            BinRule::Count(n) => Some(n),
            BinRule::Auto => None,
        };

        Ok(ChartSpec {
            kind: ChartKind::Histogram,
            source: DataSource {
                column: self.column,
                group_by: self.group_by,
            },
            requested_bins,
            binning: histogram.binning,
            traces,
            marker_line: self.marker_line,
            layout: self.layout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{CsvLoader, DatasetError};

    fn table() -> RecordTable {
        CsvLoader::new()
            .load_str("stay,readmitted\n1,NO\n2,>30\n2,NO\n")
            .unwrap()
    }

    #[test]
    fn test_build_simple_histogram() {
        let spec = ChartSpec::histogram("stay")
            .bins(4)
            .color("#FF7F0E")
            .outline(1.5, "black")
            .title("Stay")
            .center_title()
            .axis_titles("Stay", "Frequency")
            .build(&table())
            .unwrap();

        assert_eq!(spec.source.column, "stay");
        assert_eq!(spec.requested_bins, Some(4));
        assert_eq!(spec.binning.len(), 4);
        assert_eq!(spec.color(), Some("#FF7F0E"));
        assert_eq!(spec.layout.title_x, Some(0.5));
        assert_eq!(spec.layout.barmode, BarMode::Relative);
    }

    #[test]
    fn test_build_grouped_histogram() {
        let spec = ChartSpec::histogram("stay")
            .group_by("readmitted")
            .barmode(BarMode::Group)
            .bargap(0.3)
            .build(&table())
            .unwrap();

        assert_eq!(spec.traces.len(), 2);
        assert_eq!(spec.traces[0].name.as_deref(), Some("NO"));
        assert_eq!(spec.source.group_by.as_deref(), Some("readmitted"));
        assert_eq!(spec.requested_bins, None);

        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["layout"]["barmode"], "group");
        assert_eq!(json["layout"]["bargap"], 0.3);
        assert_eq!(json["binning"]["kind"], "uniform");
    }

    #[test]
    fn test_unknown_column_is_an_error() {
        let err = ChartSpec::histogram("nope").build(&table()).unwrap_err();
        assert!(matches!(err, DatasetError::ColumnNotFound(c) if c == "nope"));
    }
}
