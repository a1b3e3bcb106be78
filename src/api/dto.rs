//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::Serialize;

use crate::dashboard::{Output, Variable};

// ============================================
// EVENT DTOs
// ============================================

/// Response to an input event: the new value of every bound output
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub outputs: Vec<Output>,
}

// ============================================
// SELECTION DTOs
// ============================================

/// Current dropdown value
#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    /// Column name
    pub value: Variable,
    /// Dropdown label
    pub label: String,
    /// Bar color used for this variable
    pub color: String,
}

impl From<Variable> for SelectionResponse {
    fn from(variable: Variable) -> Self {
        Self {
            value: variable,
            label: variable.label().to_string(),
            color: variable.color().to_string(),
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Rows in the loaded dataset
    pub dataset_rows: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
