//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use core_kernel::CoreError;
use domain_invoicing::InvoiceError;
use domain_pricing::PricingError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid delegate category: {0}")]
    InvalidCategory(String),

    #[error("Invalid selections: {0}")]
    InvalidSelections(String),

    #[error("Invoice could not be generated: {0}")]
    RenderingFailed(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::InvalidCategory(raw) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "invalid_category",
                format!("Unknown delegate type '{raw}'"),
            ),
            ApiError::InvalidSelections(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_selections", msg.clone())
            }
            ApiError::RenderingFailed(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "rendering_failed",
                format!("Invoice could not be generated: {msg}"),
            ),
            ApiError::Internal(msg) => {
                error!(message = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PricingError> for ApiError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::InvalidCategory(raw) => ApiError::InvalidCategory(raw),
            PricingError::InvalidSelections(msg) => ApiError::InvalidSelections(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<InvoiceError> for ApiError {
    fn from(err: InvoiceError) -> Self {
        match err {
            InvoiceError::RenderingFailed(msg) => ApiError::RenderingFailed(msg),
            InvoiceError::Pricing(pricing) => pricing.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound(msg) => ApiError::NotFound(msg),
            CoreError::Validation(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("Rendering task failed: {err}"))
    }
}
