//! Dashboard HTTP Server
//!
//! Serves the page and the event protocol, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Dashboard page
//! - `GET /assets/dashboard.js` - Client script
//!
//! ## Dashboard
//! - `GET /api/v1/layout` - Component tree
//! - `POST /api/v1/events` - Input change, returns updated outputs
//! - `GET /api/v1/selection` - Current dropdown value
//! - `GET /api/v1/dataset` - Loaded dataset summary
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use staydash::api::{serve, AppState};
//! use staydash::config::ServerConfig;
//! use staydash::dataset::{CsvLoader, REQUIRED_COLUMNS};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = CsvLoader::new()
//!         .require(REQUIRED_COLUMNS)
//!         .load("encounters.csv".as_ref())?;
//!     let config = ServerConfig::default();
//!
//!     serve(AppState::new(dataset, config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod assets;
pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let debug = state.config.debug;

    let api_routes = Router::new()
        .route("/layout", get(routes::dataset::get_layout))
        .route("/dataset", get(routes::dataset::get_dataset))
        .route("/events", post(routes::events::dispatch_event))
        .route("/selection", get(routes::events::get_selection));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    let router = Router::new()
        .route("/", get(routes::page::index))
        .route("/assets/dashboard.js", get(routes::page::dashboard_js))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes);

    let router = if debug {
        router.layer(middleware::from_fn(error::verbose_errors))
    } else {
        router
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the dashboard server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Dashboard listening on http://{}", addr);
    if config.debug {
        tracing::warn!("Debug mode is on: verbose error bodies, local development only");
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{CsvLoader, REQUIRED_COLUMNS};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use std::path::PathBuf;
    use tower::util::ServiceExt;

    fn create_test_app(debug: bool) -> Router {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/sample_encounters.csv");
        let dataset = CsvLoader::new().require(REQUIRED_COLUMNS).load(&path).unwrap();
        let config = ServerConfig {
            debug,
            ..Default::default()
        };

        build_router(AppState::new(dataset, config))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn event_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/events")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app(true);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let app = create_test_app(true);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["dataset_rows"], 60);
    }

    #[tokio::test]
    async fn test_index_page() {
        let app = create_test_app(true);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Impact of Hospital Stay Duration"));
        assert!(html.contains("id=\"selected_variable_plot\""));
    }

    #[tokio::test]
    async fn test_layout() {
        let app = create_test_app(true);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/layout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["children"][4]["id"], "variable-dropdown");
        assert_eq!(json["children"][4]["options"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_dataset_summary() {
        let app = create_test_app(true);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/dataset")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["rows"], 60);
        let age = json["columns"]
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["name"] == "age")
            .unwrap();
        assert_eq!(age["type"], "text");
    }

    #[tokio::test]
    async fn test_event_dispatch() {
        let app = create_test_app(true);

        let response = app
            .oneshot(event_request(
                r#"{"id": "variable-dropdown", "property": "value", "value": "age"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let outputs = json["outputs"].as_array().unwrap();
        assert_eq!(outputs.len(), 4);
        assert_eq!(outputs[1]["value"]["traces"][0]["color"], "#8C564B");
        assert_eq!(outputs[1]["value"]["layout"]["title"], "Distribution of age");
        assert_eq!(outputs[2]["id"], "selected-variable-title");
        assert_eq!(outputs[2]["value"], "Selected Variable: Age");
    }

    #[tokio::test]
    async fn test_event_updates_selection() {
        let app = create_test_app(true);

        let response = app
            .clone()
            .oneshot(event_request(
                r#"{"id": "variable-dropdown", "property": "value", "value": "num_medications"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/selection")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["value"], "num_medications");
        assert_eq!(json["label"], "Number of Medications");
        assert_eq!(json["color"], "#2CA02C");
    }

    #[tokio::test]
    async fn test_unknown_column_event() {
        let app = create_test_app(true);

        let response = app
            .oneshot(event_request(
                r#"{"id": "variable-dropdown", "property": "value", "value": "unknown_col"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "COLUMN_NOT_FOUND");
        // Debug mode sends the source chain
        let detail = json["error"]["detail"].as_array().unwrap();
        assert_eq!(detail.last().unwrap(), "Column not found: unknown_col");
    }

    #[tokio::test]
    async fn test_errors_are_terse_without_debug() {
        let app = create_test_app(false);

        let response = app
            .oneshot(event_request(
                r#"{"id": "variable-dropdown", "property": "value", "value": "unknown_col"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "COLUMN_NOT_FOUND");
        assert!(json["error"].get("detail").is_none());
    }

    #[tokio::test]
    async fn test_event_without_callback() {
        let app = create_test_app(true);

        let response = app
            .oneshot(event_request(
                r#"{"id": "variable-dropdown", "property": "options", "value": "age"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "NO_CALLBACK");
    }

    #[tokio::test]
    async fn test_event_invalid_json() {
        let app = create_test_app(true);

        let response = app.oneshot(event_request("not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_event_wrong_value_type() {
        let app = create_test_app(true);

        let response = app
            .oneshot(event_request(
                r#"{"id": "variable-dropdown", "property": "value", "value": 42}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }
}
