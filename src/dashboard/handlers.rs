//! Reactive chart handlers
//!
//! Each handler is a pure function of the record table and the current
//! dropdown value. The stay-length and readmission charts accept the value
//! but do not depend on it.

use crate::chart::{BarMode, ChartSpec};
use crate::dataset::{DatasetResult, RecordTable, READMITTED, TIME_IN_HOSPITAL};

use super::selector::{humanize, variable_color};

const OUTLINE_WIDTH: f64 = 1.5;
const OUTLINE_COLOR: &str = "black";
const FREQUENCY: &str = "Frequency";

/// Distribution of length of stay, 20 bins.
pub fn time_in_hospital_chart(table: &RecordTable, _selected: &str) -> DatasetResult<ChartSpec> {
    ChartSpec::histogram(TIME_IN_HOSPITAL)
        .bins(20)
        .title("Distribution of Time in Hospital")
        .center_title()
        .axis_titles("Time in Hospital", FREQUENCY)
        .outline(OUTLINE_WIDTH, OUTLINE_COLOR)
        .build(table)
}

/// Distribution of the selected column, 30 bins, plus the subtitle text.
///
/// Unknown column names still get a color (the default one) but fail with
/// `ColumnNotFound` when the table is read.
pub fn selected_variable_chart(
    table: &RecordTable,
    selected: &str,
) -> DatasetResult<(ChartSpec, String)> {
    let pretty = humanize(selected);

    let chart = ChartSpec::histogram(selected)
        .bins(30)
        .title(format!("Distribution of {}", selected))
        .color(variable_color(selected))
        .outline(OUTLINE_WIDTH, OUTLINE_COLOR)
        .axis_titles(pretty.as_str(), FREQUENCY)
        .build(table)?;

    Ok((chart, format!("Selected Variable: {}", pretty)))
}

/// Length of stay split by readmission status, bars side by side.
pub fn readmission_chart(table: &RecordTable, _selected: &str) -> DatasetResult<ChartSpec> {
    ChartSpec::histogram(TIME_IN_HOSPITAL)
        .group_by(READMITTED)
        .barmode(BarMode::Group)
        .title("Time in Hospital vs Readmission Status")
        .center_title()
        .axis_titles("Time in Hospital (Days)", FREQUENCY)
        .bargap(0.3)
        .build(table)
}
