//! Frequency binning
//!
//! Turns a column (optionally split by a categorical column) into bin counts.
//! Numeric columns get uniform-width bins; text columns get one bin per
//! distinct value in first-appearance order.

use serde::Serialize;

use crate::dataset::Column;

/// Widest integral range that still gets one bin per integer under [`BinRule::Auto`]
pub const MAX_UNIT_BINS: usize = 500;

/// How many bins to use for a numeric column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinRule {
    /// Exactly this many uniform bins over the observed range
    Count(usize),
    /// Unit-wide bins for integral data spanning at most [`MAX_UNIT_BINS`]
    /// integers, Sturges' rule otherwise
    Auto,
}

/// Bin geometry shared by every trace of a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Binning {
    /// `count` bins of `width` starting at `start`; the last bin is closed on the right
    Uniform {
        start: f64,
        end: f64,
        width: f64,
        count: usize,
    },
    /// One bin per category
    Categorical { categories: Vec<String> },
}

impl Binning {
    pub fn len(&self) -> usize {
        match self {
            Binning::Uniform { count, .. } => *count,
            Binning::Categorical { categories } => categories.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Uniform bins spanning `[min, max]` of the given values
    pub fn uniform(values: &[f64], rule: BinRule) -> Self {
        let Some((min, max)) = min_max(values) else {
            return Binning::Uniform {
                start: 0.0,
                end: 0.0,
                width: 0.0,
                count: 0,
            };
        };

        match rule {
            BinRule::Count(n) => {
                let n = n.max(1);
                if min == max {
                    let start = min - 0.5;
                    return Binning::Uniform {
                        start,
                        end: start + 1.0,
                        width: 1.0 / n as f64,
                        count: n,
                    };
                }
                Binning::Uniform {
                    start: min,
                    end: max,
                    width: (max - min) / n as f64,
                    count: n,
                }
            }
            BinRule::Auto if max - min < MAX_UNIT_BINS as f64 && is_integral(values) => {
                let count = (max - min) as usize + 1;
                Binning::Uniform {
                    start: min - 0.5,
                    end: max + 0.5,
                    width: 1.0,
                    count,
                }
            }
            BinRule::Auto => {
                let finite = values.iter().filter(|v| v.is_finite()).count();
                let n = (finite as f64).log2().ceil() as usize + 1;
                Binning::uniform(values, BinRule::Count(n))
            }
        }
    }

    /// Categorical bins in first-appearance order
    pub fn categorical<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Binning::Categorical {
            categories: distinct_in_order(labels),
        }
    }

    fn index_of_value(&self, value: f64) -> Option<usize> {
        match self {
            Binning::Uniform {
                start,
                width,
                count,
                ..
            } => {
                // NaN and infinities are outside every bin
                if *count == 0 || !value.is_finite() {
                    return None;
                }
                let idx = ((value - start) / width).floor();
                if idx < 0.0 {
                    return None;
                }
                Some((idx as usize).min(count - 1))
            }
            Binning::Categorical { .. } => None,
        }
    }

    fn index_of_label(&self, label: &str) -> Option<usize> {
        match self {
            Binning::Categorical { categories } => categories.iter().position(|c| c == label),
            Binning::Uniform { .. } => None,
        }
    }
}

/// Bin counts for one or more groups over shared bins
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub binning: Binning,
    /// `(group label, counts)`; the label is `None` for an ungrouped histogram
    pub series: Vec<(Option<String>, Vec<u64>)>,
}

impl Histogram {
    /// Bin a single column
    pub fn of(column: &Column, rule: BinRule) -> Self {
        let rows = row_keys(column);
        let binning = binning_for(&rows, rule);
        let counts = count_rows(&binning, rows.iter());
        Histogram {
            binning,
            series: vec![(None, counts)],
        }
    }

    /// Bin a column once per category of `group`.
    ///
    /// Rows missing either value are skipped. Groups appear in first-appearance order.
    pub fn grouped(column: &Column, group: &Column, rule: BinRule) -> Self {
        let rows: Vec<(RowKey, String)> = row_keys(column)
            .into_iter()
            .zip(group.labels())
            .filter_map(|(key, label)| match (key, label) {
                (RowKey::Missing, _) | (_, None) => None,
                (key, Some(label)) => Some((key, label)),
            })
            .collect();

        let keys: Vec<RowKey> = rows.iter().map(|(k, _)| k.clone()).collect();
        let binning = binning_for(&keys, rule);

        let series = distinct_in_order(rows.iter().map(|(_, g)| g.as_str()))
            .into_iter()
            .map(|name| {
                let counts = count_rows(
                    &binning,
                    rows.iter().filter(|(_, g)| *g == name).map(|(k, _)| k),
                );
                (Some(name), counts)
            })
            .collect();

        Histogram { binning, series }
    }

    /// Sum of all counts across every series
    pub fn total(&self) -> u64 {
        self.series.iter().flat_map(|(_, c)| c.iter()).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum RowKey {
    Value(f64),
    Label(String),
    Missing,
}

fn row_keys(column: &Column) -> Vec<RowKey> {
    match column.numeric_rows() {
        Some(rows) => rows
            .into_iter()
            .map(|v| v.map(RowKey::Value).unwrap_or(RowKey::Missing))
            .collect(),
        None => column
            .labels()
            .into_iter()
            .map(|l| l.map(RowKey::Label).unwrap_or(RowKey::Missing))
            .collect(),
    }
}

fn binning_for(rows: &[RowKey], rule: BinRule) -> Binning {
    let is_text = rows.iter().any(|r| matches!(r, RowKey::Label(_)));
    if is_text {
        Binning::categorical(rows.iter().filter_map(|r| match r {
            RowKey::Label(l) => Some(l.as_str()),
            _ => None,
        }))
    } else {
        let values: Vec<f64> = rows
            .iter()
            .filter_map(|r| match r {
                RowKey::Value(v) => Some(*v),
                _ => None,
            })
            .collect();
        Binning::uniform(&values, rule)
    }
}

fn count_rows<'a, I>(binning: &Binning, rows: I) -> Vec<u64>
where
    I: Iterator<Item = &'a RowKey>,
{
    let mut counts = vec![0u64; binning.len()];
    for row in rows {
        let idx = match row {
            RowKey::Value(v) => binning.index_of_value(*v),
            RowKey::Label(l) => binning.index_of_label(l),
            RowKey::Missing => None,
        };
        if let Some(idx) = idx {
            counts[idx] += 1;
        }
    }
    counts
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    (min <= max).then_some((min, max))
}

fn is_integral(values: &[f64]) -> bool {
    values
        .iter()
        .filter(|v| v.is_finite())
        .all(|v| v.fract() == 0.0)
}

fn distinct_in_order<'a, I>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<String> = Vec::new();
    for label in labels {
        if !out.iter().any(|l| l == label) {
            out.push(label.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ColumnData;

    fn ints(name: &str, values: &[i64]) -> Column {
        Column::new(name, ColumnData::Integer(values.iter().map(|&v| Some(v)).collect()))
    }

    fn text(name: &str, values: &[&str]) -> Column {
        Column::new(
            name,
            ColumnData::Text(values.iter().map(|v| Some(v.to_string())).collect()),
        )
    }

    #[test]
    fn test_uniform_bins_cover_range() {
        let column = ints("time_in_hospital", &[1, 2, 3, 14, 7, 7]);
        let hist = Histogram::of(&column, BinRule::Count(20));

        match &hist.binning {
            Binning::Uniform {
                start,
                end,
                width,
                count,
            } => {
                assert_eq!(*count, 20);
                assert_eq!(*start, 1.0);
                assert_eq!(*end, 14.0);
                assert!((width - 13.0 / 20.0).abs() < 1e-12);
            }
            other => panic!("expected uniform bins, got {:?}", other),
        }

        let counts = &hist.series[0].1;
        assert_eq!(counts.len(), 20);
        assert_eq!(hist.total(), 6);
        assert_eq!(counts[0], 1);
        // The maximum lands in the closed last bin
        assert_eq!(counts[19], 1);
    }

    #[test]
    fn test_constant_column() {
        let column = ints("x", &[5, 5, 5]);
        let hist = Histogram::of(&column, BinRule::Count(4));
        assert_eq!(hist.binning.len(), 4);
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn test_empty_column() {
        let column = Column::new("x", ColumnData::Integer(vec![None, None]));
        let hist = Histogram::of(&column, BinRule::Count(10));
        assert!(hist.binning.is_empty());
        assert_eq!(hist.total(), 0);
    }

    #[test]
    fn test_categorical_first_appearance_order() {
        let column = text("age", &["[70-80)", "[50-60)", "[70-80)", "[0-10)"]);
        let hist = Histogram::of(&column, BinRule::Count(30));

        assert_eq!(
            hist.binning,
            Binning::Categorical {
                categories: vec!["[70-80)".into(), "[50-60)".into(), "[0-10)".into()]
            }
        );
        assert_eq!(hist.series[0].1, vec![2, 1, 1]);
    }

    #[test]
    fn test_auto_bins_integral_data() {
        let column = ints("x", &[1, 3, 3, 4]);
        let hist = Histogram::of(&column, BinRule::Auto);

        assert_eq!(
            hist.binning,
            Binning::Uniform {
                start: 0.5,
                end: 4.5,
                width: 1.0,
                count: 4
            }
        );
        assert_eq!(hist.series[0].1, vec![1, 0, 2, 1]);
    }

    #[test]
    fn test_non_finite_values_are_not_counted() {
        let column = Column::new(
            "x",
            ColumnData::Float(vec![
                Some(1.0),
                Some(f64::NAN),
                Some(5.0),
                Some(f64::INFINITY),
                Some(f64::NEG_INFINITY),
            ]),
        );
        let hist = Histogram::of(&column, BinRule::Count(2));

        assert_eq!(hist.series[0].1, vec![1, 1]);
        assert_eq!(hist.total(), 2);
    }

    #[test]
    fn test_auto_bins_wide_integral_range_falls_back_to_sturges() {
        let column = ints("time_in_hospital", &[1, 200_000_000]);
        let hist = Histogram::of(&column, BinRule::Auto);

        // ceil(log2(2)) + 1
        assert_eq!(hist.binning.len(), 2);
        assert_eq!(hist.series[0].1, vec![1, 1]);

        let narrow = ints("x", &[0, (MAX_UNIT_BINS - 1) as i64]);
        assert_eq!(Histogram::of(&narrow, BinRule::Auto).binning.len(), MAX_UNIT_BINS);

        let wide = ints("x", &[0, MAX_UNIT_BINS as i64]);
        assert_eq!(Histogram::of(&wide, BinRule::Auto).binning.len(), 2);
    }

    #[test]
    fn test_grouped_shares_bins() {
        let stay = ints("time_in_hospital", &[1, 2, 2, 3, 1]);
        let readmitted = text("readmitted", &["NO", ">30", "NO", "<30", "NO"]);
        let hist = Histogram::grouped(&stay, &readmitted, BinRule::Auto);

        assert_eq!(hist.binning.len(), 3);
        let names: Vec<_> = hist.series.iter().map(|(n, _)| n.clone().unwrap()).collect();
        assert_eq!(names, vec!["NO", ">30", "<30"]);
        assert_eq!(hist.series[0].1, vec![2, 1, 0]);
        assert_eq!(hist.series[1].1, vec![0, 1, 0]);
        assert_eq!(hist.series[2].1, vec![0, 0, 1]);
        assert_eq!(hist.total(), 5);
    }
}
