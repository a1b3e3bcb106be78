//! Dashboard
//!
//! The page and its reactive behavior:
//!
//! - **layout**: the static component tree (headings, dropdown, graph slots)
//! - **selector**: the eight dropdown variables and their colors
//! - **handlers**: the three chart handlers
//! - **dispatch**: binds the dropdown's value to the handlers' outputs
//! - **error**: Error types

pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod layout;
pub mod selector;

pub use dispatch::{Callback, CallbackFn, DispatchTable, InputEvent, Output, OutputValue, Target};
pub use error::{DashboardError, DashboardResult};
pub use handlers::{readmission_chart, selected_variable_chart, time_in_hospital_chart};
pub use layout::{build_layout, Component, DropdownOption};
pub use selector::{humanize, variable_color, Variable, DEFAULT_COLOR};
