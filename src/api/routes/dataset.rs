//! Dataset and Layout Routes
//!
//! - GET /api/v1/layout - Component tree of the page
//! - GET /api/v1/dataset - Summary of the loaded dataset

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::dashboard::Component;
use crate::dataset::DatasetSummary;

/// GET /api/v1/layout
pub async fn get_layout(State(state): State<Arc<AppState>>) -> Json<Component> {
    Json(state.layout.as_ref().clone())
}

/// GET /api/v1/dataset
pub async fn get_dataset(State(state): State<Arc<AppState>>) -> Json<DatasetSummary> {
    Json(state.dataset.summary())
}
