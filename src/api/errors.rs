//! # API Errors
//!
//! Error types for the HTTP API module.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::storage::StorageError;

/// Result type for handler operations
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Request body failed shape or range validation
    #[error("{0}")]
    Validation(String),

    /// Rejected nearby-search radius
    #[error("Search radius (distance_km) must be a positive number.")]
    NonPositiveRadius,

    /// Referenced address does not exist
    #[error("Address not found")]
    AddressNotFound,

    /// Nearby search matched no stored address
    #[error("No addresses found within {radius_km:?} km of the specified location.")]
    NoNearbyAddresses { radius_km: f64 },

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Storage failure during the operation
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 422 Unprocessable Entity
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,

            // 400 Bad Request
            ApiError::NonPositiveRadius => StatusCode::BAD_REQUEST,

            // 404 Not Found
            ApiError::AddressNotFound => StatusCode::NOT_FOUND,
            ApiError::NoNearbyAddresses { .. } => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage(err) = &self {
            tracing::error!(error = %err, "storage failure");
        }
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

// Malformed or unparseable bodies surface as the same 422 validation
// failure as out-of-range fields.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}
