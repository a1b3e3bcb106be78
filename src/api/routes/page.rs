//! Page Routes
//!
//! - GET / - Dashboard page
//! - GET /assets/dashboard.js - Client script

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
};
use std::sync::Arc;

use crate::api::assets::{render_page, DASHBOARD_JS};
use crate::api::state::AppState;

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(&state.layout))
}

/// GET /assets/dashboard.js
pub async fn dashboard_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        DASHBOARD_JS,
    )
}
