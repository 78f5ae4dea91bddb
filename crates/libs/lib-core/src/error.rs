//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used by the
//! web layer. It follows the `thiserror` pattern for ergonomic error handling.
//!
//! ## Error Categories
//!
//! 1. **Client Errors** (4xx)
//!    - [`NotFound`](AppError::NotFound) → 404 Not Found
//!
//! 2. **Completion Errors** - the completion route answers every failure with 500
//!    - [`Provider`](AppError::Provider) → 500, body carries the provider's payload
//!    - [`Upstream`](AppError::Upstream) → 500, body carries a fixed message
//!    - [`InvalidInput`](AppError::InvalidInput) → 500, body carries a fixed message
//!
//! 3. **Server Errors** (5xx) - Internal/system issues
//!    - [`Config`](AppError::Config) → 500 Internal Server Error
//!    - [`Internal`](AppError::Internal) → 500 Internal Server Error
//!
//! ## Response Bodies
//!
//! Provider errors answer with exactly `{"error": ...}` so the chat client sees the
//! same shape whether the model rejected the call or the network did. Every other
//! variant answers `{"error": <user message>, "code": <variant>}`.
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn parse_key(key: &str) -> Result<(&str, &str)> {
//!     key.split_once(':')
//!         .ok_or_else(|| AppError::Config("API key must look like name:secret".to_string()))
//! }
//! ```

use thiserror::Error;
use axum::{extract::rejection::JsonRejection, http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;

/// Message returned when a completion fails without a structured provider reply.
pub const GENERIC_COMPLETION_ERROR: &str = "An error occurred during your request.";

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type covering all error scenarios.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error during startup or on first use of a provider key.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The completion API answered with a non-success status.
    ///
    /// `data` is the provider's response body (parsed JSON, or the raw text as a JSON
    /// string when it was not JSON).
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Provider error (status {status}): {data}")]
    Provider {
        status: u16,
        data: serde_json::Value,
    },

    /// The completion call failed without a provider reply (network, timeout, decode).
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The request body could not be read as a completion request.
    ///
    /// **HTTP Status**: 500 Internal Server Error, same body as [`AppError::Upstream`]
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal server error (unexpected failures).
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Requested resource not found.
    ///
    /// **HTTP Status**: 404 Not Found
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Provider { .. }
            | AppError::Upstream(_)
            | AppError::InvalidInput(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// For internal errors, returns a generic message to avoid exposing implementation details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::NotFound(msg) => msg.clone(),
            AppError::Provider { .. } | AppError::Upstream(_) | AppError::InvalidInput(_) => {
                GENERIC_COMPLETION_ERROR.to_string()
            }
            AppError::Config(_) | AppError::Internal(_) => "An internal error occurred".to_string(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "Config",
            AppError::Provider { .. } => "Provider",
            AppError::Upstream(_) => "Upstream",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Internal(_) => "Internal",
            AppError::NotFound(_) => "NotFound",
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match status {
            StatusCode::NOT_FOUND => {
                tracing::debug!("Client error: {}", self);
            }
            _ => {
                tracing::error!("Server error: {}", self);
            }
        }

        let body = match self {
            AppError::Provider { data, .. } => json!({ "error": data }),
            AppError::Upstream(_) | AppError::InvalidInput(_) => json!({ "error": GENERIC_COMPLETION_ERROR }),
            other => json!({
                "error": other.user_message(),
                "code": other.code(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

/// A completion body axum could not extract (wrong content type, bad JSON,
/// missing `prompt`).
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}
