//! Event Routes
//!
//! - POST /api/v1/events - Dispatch an input change to its callbacks
//! - GET /api/v1/selection - Current dropdown value

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{EventResponse, SelectionResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dashboard::{layout::VARIABLE_DROPDOWN, InputEvent, Variable};

/// POST /api/v1/events
///
/// Runs every callback bound to `(id, property)` with `value` and returns
/// the new value of each bound output. A dropdown event also updates the
/// server-side selection.
pub async fn dispatch_event(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InputEvent>, JsonRejection>,
) -> ApiResult<Json<EventResponse>> {
    let Json(event) = payload?;
    let dataset = Arc::clone(&state.dataset);
    let dispatch = Arc::clone(&state.dispatch);
    let pending = event.clone();

    let outputs = tokio::task::spawn_blocking(move || dispatch.dispatch(&dataset.table, &pending))
        .await
        .map_err(|e| ApiError::Internal(format!("Callback task failed: {}", e)))??;

    if event.id == VARIABLE_DROPDOWN {
        if let Some(variable) = Variable::from_column(&event.value) {
            state.select(variable).await;
        }
    }

    tracing::info!(
        id = %event.id,
        property = %event.property,
        value = %event.value,
        outputs = outputs.len(),
        "Dispatched event"
    );

    Ok(Json(EventResponse { outputs }))
}

/// GET /api/v1/selection
pub async fn get_selection(State(state): State<Arc<AppState>>) -> Json<SelectionResponse> {
    Json(state.selected().await.into())
}
