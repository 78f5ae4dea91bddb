//! # Common Error Types
//!
//! Consolidated error handling for the chat terminal.
//!
//! ## Error Categories
//!
//! - **Api**: Backend communication errors (network, HTTP status, JSON parsing)
//! - **Realtime**: Realtime provider errors (token exchange, websocket, publish)
//! - **Config**: Invalid client configuration
//!
//! ## Usage Pattern
//!
//! ```rust
//! use terminal::core::error::{AppError, Result};
//!
//! fn require_connection(connection_id: Option<&str>) -> Result<&str> {
//!     connection_id.ok_or_else(|| AppError::Realtime("not connected".to_string()))
//! }
//! ```

use thiserror::Error;

/// Application-wide error type for the chat terminal.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend API communication error.
    ///
    /// For non-success replies the message carries the backend's `error` payload.
    ///
    /// ```rust
    /// use terminal::core::error::AppError;
    ///
    /// let err = AppError::Api("Connection refused".to_string());
    /// assert_eq!(err.to_string(), "API error: Connection refused");
    /// ```
    #[error("API error: {0}")]
    Api(String),

    /// Realtime provider error.
    #[error("Realtime error: {0}")]
    Realtime(String),

    /// Invalid configuration (bad URL, missing value).
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Api(err.to_string())
    }
}

impl From<lib_realtime::RealtimeError> for AppError {
    fn from(err: lib_realtime::RealtimeError) -> Self {
        AppError::Realtime(err.to_string())
    }
}
