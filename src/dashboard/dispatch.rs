//! Event dispatch
//!
//! Maps an input event `(component id, property)` to the callbacks bound to it.
//! Every matching callback runs with the event's value and its results are
//! paired with the outputs it declared.
//!
//! ```text
//! variable-dropdown.value ─┬─> time_in_hospital   ─> time_in_hospital_plot.figure
//!                          ├─> selected_variable  ─> selected_variable_plot.figure
//!                          │                         selected-variable-title.children
//!                          └─> readmission        ─> readmission_plot.figure
//! ```

use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::error::{DashboardError, DashboardResult};
use super::handlers;
use super::layout::{
    READMISSION_PLOT, SELECTED_VARIABLE_PLOT, SELECTED_VARIABLE_TITLE, TIME_IN_HOSPITAL_PLOT,
    VARIABLE_DROPDOWN,
};
use crate::chart::ChartSpec;
use crate::dataset::{DatasetResult, RecordTable};

/// A component property, e.g. `variable-dropdown.value`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Target {
    pub id: &'static str,
    pub property: &'static str,
}

impl Target {
    pub const fn new(id: &'static str, property: &'static str) -> Self {
        Self { id, property }
    }

    fn matches(&self, id: &str, property: &str) -> bool {
        self.id == id && self.property == property
    }
}

/// A value changed on the page
#[derive(Debug, Clone, Deserialize)]
pub struct InputEvent {
    pub id: String,
    pub property: String,
    pub value: String,
}

/// Value written into one output slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutputValue {
    Figure(ChartSpec),
    Text(String),
}

/// One output slot and its new value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Output {
    pub id: &'static str,
    pub property: &'static str,
    pub value: OutputValue,
}

/// Handler signature: table and input value in, one value per declared output out
pub type CallbackFn = fn(&RecordTable, &str) -> DatasetResult<Vec<OutputValue>>;

/// A handler bound to one input and a fixed list of outputs
#[derive(Clone)]
pub struct Callback {
    pub name: &'static str,
    pub input: Target,
    pub outputs: Vec<Target>,
    pub handler: CallbackFn,
}

impl std::fmt::Debug for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callback")
            .field("name", &self.name)
            .field("input", &self.input)
            .field("outputs", &self.outputs)
            .finish_non_exhaustive()
    }
}

/// Registry of callbacks keyed by their input
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    callbacks: Vec<Callback>,
}

impl DispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard's three callbacks, all driven by the dropdown value
    pub fn dashboard() -> Self {
        let dropdown = Target::new(VARIABLE_DROPDOWN, "value");

        let mut table = Self::new();
        table.register(Callback {
            name: "time_in_hospital",
            input: dropdown,
            outputs: vec![Target::new(TIME_IN_HOSPITAL_PLOT, "figure")],
            handler: |t, v| Ok(vec![OutputValue::Figure(handlers::time_in_hospital_chart(t, v)?)]),
        });
        table.register(Callback {
            name: "selected_variable",
            input: dropdown,
            outputs: vec![
                Target::new(SELECTED_VARIABLE_PLOT, "figure"),
                Target::new(SELECTED_VARIABLE_TITLE, "children"),
            ],
            handler: |t, v| {
                let (chart, subtitle) = handlers::selected_variable_chart(t, v)?;
                Ok(vec![OutputValue::Figure(chart), OutputValue::Text(subtitle)])
            },
        });
        table.register(Callback {
            name: "readmission",
            input: dropdown,
            outputs: vec![Target::new(READMISSION_PLOT, "figure")],
            handler: |t, v| Ok(vec![OutputValue::Figure(handlers::readmission_chart(t, v)?)]),
        });
        table
    }

    pub fn register(&mut self, callback: Callback) {
        self.callbacks.push(callback);
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Callbacks bound to the given input
    pub fn callbacks_for<'a>(
        &'a self,
        id: &'a str,
        property: &'a str,
    ) -> impl Iterator<Item = &'a Callback> + 'a {
        self.callbacks
            .iter()
            .filter(move |c| c.input.matches(id, property))
    }

    /// Run every callback bound to the event's input.
    ///
    /// Callbacks are independent; the first failure aborts the whole event.
    pub fn dispatch(
        &self,
        table: &RecordTable,
        event: &InputEvent,
    ) -> DashboardResult<Vec<Output>> {
        let mut outputs = Vec::new();
        let mut matched = false;

        for callback in self.callbacks_for(&event.id, &event.property) {
            matched = true;
            let started = Instant::now();

            let values = (callback.handler)(table, &event.value)?;
            if values.len() != callback.outputs.len() {
                return Err(DashboardError::OutputArity {
                    callback: callback.name,
                    expected: callback.outputs.len(),
                    actual: values.len(),
                });
            }

            tracing::debug!(
                callback = callback.name,
                value = %event.value,
                elapsed_us = started.elapsed().as_micros() as u64,
                "Callback completed"
            );

            outputs.extend(callback.outputs.iter().zip(values).map(|(target, value)| Output {
                id: target.id,
                property: target.property,
                value,
            }));
        }

        if !matched {
            return Err(DashboardError::NoCallback {
                id: event.id.clone(),
                property: event.property.clone(),
            });
        }

        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{CsvLoader, DatasetError};

    fn table() -> RecordTable {
        CsvLoader::new()
            .load_str(
                "time_in_hospital,readmitted,age,number_diagnoses\n\
                 3,NO,[70-80),9\n\
                 1,>30,[50-60),5\n\
                 14,<30,[70-80),7\n",
            )
            .unwrap()
    }

    fn event(value: &str) -> InputEvent {
        InputEvent {
            id: VARIABLE_DROPDOWN.to_string(),
            property: "value".to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_dropdown_change_fills_every_output() {
        let dispatch = DispatchTable::dashboard();
        assert_eq!(dispatch.len(), 3);

        let outputs = dispatch.dispatch(&table(), &event("age")).unwrap();
        let slots: Vec<_> = outputs.iter().map(|o| (o.id, o.property)).collect();
        assert_eq!(
            slots,
            vec![
                (TIME_IN_HOSPITAL_PLOT, "figure"),
                (SELECTED_VARIABLE_PLOT, "figure"),
                (SELECTED_VARIABLE_TITLE, "children"),
                (READMISSION_PLOT, "figure"),
            ]
        );
        assert_eq!(
            outputs[2].value,
            OutputValue::Text("Selected Variable: Age".to_string())
        );
    }

    #[test]
    fn test_unknown_input_has_no_callback() {
        let dispatch = DispatchTable::dashboard();
        let mut ev = event("age");
        ev.id = "other-dropdown".to_string();

        let err = dispatch.dispatch(&table(), &ev).unwrap_err();
        assert!(matches!(err, DashboardError::NoCallback { id, .. } if id == "other-dropdown"));
    }

    #[test]
    fn test_unknown_column_fails_the_event() {
        let dispatch = DispatchTable::dashboard();
        let err = dispatch.dispatch(&table(), &event("unknown_col")).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Dataset(DatasetError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_output_arity_is_checked() {
        let mut dispatch = DispatchTable::new();
        dispatch.register(Callback {
            name: "broken",
            input: Target::new("x", "value"),
            outputs: vec![Target::new("a", "children"), Target::new("b", "children")],
            handler: |_, v| Ok(vec![OutputValue::Text(v.to_string())]),
        });

        let ev = InputEvent {
            id: "x".into(),
            property: "value".into(),
            value: "1".into(),
        };
        let err = dispatch.dispatch(&table(), &ev).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::OutputArity { expected: 2, actual: 1, .. }
        ));
    }

    #[test]
    fn test_output_json_shape() {
        let outputs = DispatchTable::dashboard()
            .dispatch(&table(), &event("number_diagnoses"))
            .unwrap();
        let json = serde_json::to_value(&outputs).unwrap();

        assert_eq!(json[1]["id"], "selected_variable_plot");
        assert_eq!(json[1]["value"]["kind"], "histogram");
        assert_eq!(json[1]["value"]["traces"][0]["color"], "#1F77B4");
        assert_eq!(json[2]["value"], "Selected Variable: Number Diagnoses");
    }
}
