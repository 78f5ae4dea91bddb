//! # Chat Message Data Transfer Objects
//!
//! Message shape published to and received from the realtime channel.

use serde::{Deserialize, Serialize};

/// Realtime channel every client subscribes and publishes to
pub const CHAT_CHANNEL: &str = "chat-demo";

/// Event name used for every chat message
pub const CHAT_MESSAGE_NAME: &str = "chat-message";

/// A chat message as carried by the realtime provider.
///
/// `connection_id`, `client_id` and `timestamp` are assigned by the provider on
/// delivery; outbound messages leave them unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub name: String,
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ChatMessage {
    /// Outbound chat message with no id.
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            name: CHAT_MESSAGE_NAME.to_string(),
            data: data.into(),
            id: None,
            connection_id: None,
            client_id: None,
            timestamp: None,
        }
    }

    /// Outbound chat message carrying an explicit id.
    pub fn with_id(data: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::new(data)
        }
    }
}
