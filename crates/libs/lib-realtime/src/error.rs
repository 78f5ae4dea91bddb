//! # Realtime Errors

use crate::protocol::ErrorInfo;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RealtimeError>;

#[derive(Debug, Error)]
pub enum RealtimeError {
    /// API key is not of the form `keyName:keySecret`.
    #[error("Invalid API key: {0}")]
    InvalidKey(String),

    /// Transport failure talking to the REST API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected a request or closed the connection with an error.
    #[error("Provider error: {0}")]
    Provider(ErrorInfo),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// The provider sent something this client does not understand.
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The connection's writer task has gone away.
    #[error("Connection closed")]
    Closed,
}
