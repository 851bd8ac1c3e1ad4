//! Error types for the catalog server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

/// Body text for every 5xx response
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

// == Catalog Error Enum ==
/// Unified error type for the catalog server.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The storage medium could not be read or written
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Stored content exists but is not a valid item collection
    #[error("Decode error: {0}")]
    Decode(String),

    /// Requested item does not exist
    #[error("{0}")]
    NotFound(String),

    /// Create payload failed validation
    #[error("{0}")]
    InvalidPayload(String),
}

impl CatalogError {
    /// Shorthand for the item lookup miss used by `get`.
    pub fn item_not_found() -> Self {
        CatalogError::NotFound("Item not found".to_string())
    }

    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Storage details stay in the log; clients get a generic body
        let message = if status.is_server_error() {
            error!("Error {}: {}", status.as_u16(), self);
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            debug!("Error {}: {}", status.as_u16(), self);
            self.to_string()
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the catalog server.
pub type Result<T> = std::result::Result<T, CatalogError>;
