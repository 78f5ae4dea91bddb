//! # Completion Proxy Data Transfer Objects

use serde::{Deserialize, Serialize};

/// Body of `POST /api/openai/route`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionRequest {
    pub prompt: String,
}

/// Successful completion proxy reply
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionResponse {
    pub result: String,
}

/// Error reply.
///
/// `error` is either a fixed message string or the provider's own error payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: serde_json::Value,
}
