//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    extract::{rejection::JsonRejection, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::dashboard::DashboardError;
use crate::dataset::DatasetError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Event dispatch or a chart handler failed
    #[error("Callback error: {0}")]
    Dashboard(#[from] DashboardError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    /// Source chain, only sent in debug mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Vec<String>>,
}

/// Full error body stashed on the response for [`verbose_errors`]
#[derive(Debug, Clone)]
pub struct VerboseError(pub ErrorResponse);

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Dashboard(e) => match e {
                DashboardError::Dataset(DatasetError::ColumnNotFound(_)) => {
                    (StatusCode::NOT_FOUND, "COLUMN_NOT_FOUND")
                }
                DashboardError::Dataset(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATASET_ERROR"),
                DashboardError::NoCallback { .. } => (StatusCode::NOT_FOUND, "NO_CALLBACK"),
                DashboardError::OutputArity { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "CALLBACK_ERROR")
                }
            },
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }

    /// Messages of this error and every source below it
    fn chain(&self) -> Vec<String> {
        let mut chain = vec![self.to_string()];
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            chain.push(err.to_string());
            source = err.source();
        }
        chain
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let request_id = uuid::Uuid::new_v4().to_string();

        // Log the error
        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "API error occurred"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
                detail: None,
            },
            request_id,
        };

        let mut verbose = body.clone();
        verbose.error.detail = Some(self.chain());

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(VerboseError(verbose));
        response
    }
}

/// Debug-mode middleware: replace error bodies with their verbose form
pub async fn verbose_errors(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<VerboseError>() {
        Some(VerboseError(body)) => (response.status(), Json(body)).into_response(),
        None => response,
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
