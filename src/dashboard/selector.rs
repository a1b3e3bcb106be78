//! Dropdown variables
//!
//! The eight selectable columns, their dropdown labels and chart colors,
//! plus the column-name prettifier used in axis titles and subtitles.

use serde::Serialize;

/// Color used when a column has no entry in the color table
pub const DEFAULT_COLOR: &str = "#17BECF";

/// A column the dropdown can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    #[default]
    NumLabProcedures,
    NumberDiagnoses,
    NumMedications,
    DischargeDispositionId,
    NumberOutpatient,
    Age,
    NumberEmergency,
    NumProcedures,
}

impl Variable {
    /// Every option, in dropdown order
    pub const ALL: [Variable; 8] = [
        Variable::NumLabProcedures,
        Variable::NumberDiagnoses,
        Variable::NumMedications,
        Variable::DischargeDispositionId,
        Variable::NumberOutpatient,
        Variable::Age,
        Variable::NumberEmergency,
        Variable::NumProcedures,
    ];

    /// Column name in the dataset
    pub fn column(self) -> &'static str {
        match self {
            Variable::NumLabProcedures => "num_lab_procedures",
            Variable::NumberDiagnoses => "number_diagnoses",
            Variable::NumMedications => "num_medications",
            Variable::DischargeDispositionId => "discharge_disposition_id",
            Variable::NumberOutpatient => "number_outpatient",
            Variable::Age => "age",
            Variable::NumberEmergency => "number_emergency",
            Variable::NumProcedures => "num_procedures",
        }
    }

    /// Text shown in the dropdown
    pub fn label(self) -> &'static str {
        match self {
            Variable::NumLabProcedures => "Number of Lab Procedures",
            Variable::NumberDiagnoses => "Number of Diagnoses",
            Variable::NumMedications => "Number of Medications",
            Variable::DischargeDispositionId => "Number of Discharge Disposition ID",
            Variable::NumberOutpatient => "Number of Out Patient",
            Variable::Age => "Age",
            Variable::NumberEmergency => "Number of Emergency",
            Variable::NumProcedures => "Number of Procedures",
        }
    }

    /// Bar color for this variable's histogram
    pub fn color(self) -> &'static str {
        match self {
            Variable::NumLabProcedures => "#FF7F0E",       // orange
            Variable::NumberDiagnoses => "#1F77B4",        // blue
            Variable::NumMedications => "#2CA02C",         // green
            Variable::DischargeDispositionId => "#D62728", // red
            Variable::NumberOutpatient => "#9467BD",       // purple
            Variable::Age => "#8C564B",                    // brown
            Variable::NumberEmergency => "#E377C2",        // pink
            Variable::NumProcedures => "#7F7F7F",          // gray
        }
    }

    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.column() == column)
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

/// Color for a column name, falling back to [`DEFAULT_COLOR`]
pub fn variable_color(column: &str) -> &'static str {
    Variable::from_column(column)
        .map(Variable::color)
        .unwrap_or(DEFAULT_COLOR)
}

/// `number_diagnoses` -> `Number Diagnoses`.
///
/// Underscores become spaces, then the first letter of every run of letters is
/// upper-cased and the rest lower-cased.
pub fn humanize(column: &str) -> String {
    let mut out = String::with_capacity(column.len());
    let mut prev_is_letter = false;

    for ch in column.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }

    out
}
