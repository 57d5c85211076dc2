//! Error types for the location service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::backing::BackingStoreError;
use crate::models::ErrorResponse;

/// Message returned to callers for any unexpected failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Message returned when an update targets a missing country.
pub const COUNTRY_NOT_FOUND_MESSAGE: &str = "Country Does Not Exists";

// == Location Error Enum ==
/// Unified error type for repository and API operations.
#[derive(Error, Debug)]
pub enum LocationError {
    /// Caller-supplied identifiers are inconsistent
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The targeted record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other persistence failure
    #[error("Backing store error: {0}")]
    BackingStore(#[from] BackingStoreError),
}

// == IntoResponse Implementation ==
impl IntoResponse for LocationError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            LocationError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            LocationError::NotFound(_) => {
                (StatusCode::NOT_FOUND, COUNTRY_NOT_FOUND_MESSAGE.to_string())
            }
            LocationError::BackingStore(e) => {
                // Internal detail stays in the logs
                error!(error = %e, "backing store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(status.as_u16(), message));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the location service.
pub type Result<T> = std::result::Result<T, LocationError>;
