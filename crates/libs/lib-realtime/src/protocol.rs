//! # Realtime Protocol Messages
//!
//! JSON frames exchanged over the realtime websocket (`format=json`). Only the
//! fields the chat needs are modelled; everything else is ignored on read.

use serde::{Deserialize, Serialize};
use shared::ChatMessage;
use std::fmt;
use tracing::warn;

/// Protocol action codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum Action {
    #[default]
    Heartbeat,
    Ack,
    Nack,
    Connect,
    Connected,
    Disconnect,
    Disconnected,
    Close,
    Closed,
    Error,
    Attach,
    Attached,
    Detach,
    Detached,
    Presence,
    Message,
    Sync,
    Auth,
    Unknown(u8),
}

impl From<u8> for Action {
    fn from(code: u8) -> Self {
        match code {
            0 => Action::Heartbeat,
            1 => Action::Ack,
            2 => Action::Nack,
            3 => Action::Connect,
            4 => Action::Connected,
            5 => Action::Disconnect,
            6 => Action::Disconnected,
            7 => Action::Close,
            8 => Action::Closed,
            9 => Action::Error,
            10 => Action::Attach,
            11 => Action::Attached,
            12 => Action::Detach,
            13 => Action::Detached,
            14 => Action::Presence,
            15 => Action::Message,
            16 => Action::Sync,
            17 => Action::Auth,
            other => Action::Unknown(other),
        }
    }
}

impl From<Action> for u8 {
    fn from(action: Action) -> Self {
        match action {
            Action::Heartbeat => 0,
            Action::Ack => 1,
            Action::Nack => 2,
            Action::Connect => 3,
            Action::Connected => 4,
            Action::Disconnect => 5,
            Action::Disconnected => 6,
            Action::Close => 7,
            Action::Closed => 8,
            Action::Error => 9,
            Action::Attach => 10,
            Action::Attached => 11,
            Action::Detach => 12,
            Action::Detached => 13,
            Action::Presence => 14,
            Action::Message => 15,
            Action::Sync => 16,
            Action::Auth => 17,
            Action::Unknown(code) => code,
        }
    }
}

/// Error payload attached to ERROR, NACK, DISCONNECTED and REST failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (code {}, status {})",
            self.message.as_deref().unwrap_or("unknown error"),
            self.code.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string()),
            self.status_code.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_message_size: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolMessage {
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_details: Option<ConnectionDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg_serial: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
    /// Raw messages; non-chat payloads are dropped in [`ProtocolMessage::chat_messages`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<serde_json::Value>,
}

impl ProtocolMessage {
    pub fn attach(channel: &str) -> Self {
        Self {
            action: Action::Attach,
            channel: Some(channel.to_string()),
            ..Self::default()
        }
    }

    pub fn publish(channel: &str, msg_serial: u64, message: &ChatMessage) -> serde_json::Result<Self> {
        Ok(Self {
            action: Action::Message,
            channel: Some(channel.to_string()),
            msg_serial: Some(msg_serial),
            messages: vec![serde_json::to_value(message)?],
            ..Self::default()
        })
    }

    pub fn close() -> Self {
        Self {
            action: Action::Close,
            ..Self::default()
        }
    }

    /// Chat messages carried by a MESSAGE frame.
    ///
    /// Each message inherits the frame's `connectionId` and `timestamp` when it has
    /// none of its own, and gets the id `"{frame id}:{index}"` when unset. Entries
    /// whose `data` is not a string are skipped.
    pub fn chat_messages(&self) -> Vec<ChatMessage> {
        self.messages
            .iter()
            .enumerate()
            .filter_map(|(index, raw)| {
                let mut message: ChatMessage = match serde_json::from_value(raw.clone()) {
                    Ok(message) => message,
                    Err(e) => {
                        warn!("Skipping non-chat message on {:?}: {}", self.channel, e);
                        return None;
                    }
                };

                if message.connection_id.is_none() {
                    message.connection_id = self.connection_id.clone();
                }
                if message.timestamp.is_none() {
                    message.timestamp = self.timestamp;
                }
                if message.id.is_none() {
                    message.id = self.id.as_ref().map(|id| format!("{}:{}", id, index));
                }

                Some(message)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_codes() {
        let frame: ProtocolMessage = serde_json::from_str(r#"{"action":4,"connectionId":"c1"}"#).unwrap();
        assert_eq!(frame.action, Action::Connected);

        let frame: ProtocolMessage = serde_json::from_str(r#"{"action":42}"#).unwrap();
        assert_eq!(frame.action, Action::Unknown(42));

        let json = serde_json::to_value(ProtocolMessage::attach("chat-demo")).unwrap();
        assert_eq!(json, json!({ "action": 10, "channel": "chat-demo" }));
    }

    #[test]
    fn test_publish_frame_shape() {
        let message = ChatMessage::with_id("OpenAI: 4", "openai-Ab3dE6gH");
        let frame = ProtocolMessage::publish("chat-demo", 7, &message).unwrap();
        let json = serde_json::to_value(frame).unwrap();

        assert_eq!(
            json,
            json!({
                "action": 15,
                "channel": "chat-demo",
                "msgSerial": 7,
                "messages": [{ "name": "chat-message", "data": "OpenAI: 4", "id": "openai-Ab3dE6gH" }]
            })
        );
    }

    #[test]
    fn test_inbound_messages_inherit_frame_fields() {
        let frame: ProtocolMessage = serde_json::from_value(json!({
            "action": 15,
            "id": "conn-9:3",
            "channel": "chat-demo",
            "connectionId": "conn-9",
            "timestamp": 1_700_000_000_000_i64,
            "messages": [
                { "name": "chat-message", "data": "first" },
                { "name": "chat-message", "data": "second", "id": "openai-xyz12345" }
            ]
        }))
        .unwrap();

        let messages = frame.chat_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].id.as_deref(), Some("conn-9:3:0"));
        assert_eq!(messages[0].connection_id.as_deref(), Some("conn-9"));
        assert_eq!(messages[0].timestamp, Some(1_700_000_000_000));
        assert_eq!(messages[1].id.as_deref(), Some("openai-xyz12345"));
        assert_eq!(messages[1].connection_id.as_deref(), Some("conn-9"));
    }

    #[test]
    fn test_non_string_payloads_are_skipped() {
        let frame: ProtocolMessage = serde_json::from_value(json!({
            "action": 15,
            "channel": "chat-demo",
            "messages": [
                { "name": "chat-message", "data": { "nested": true } },
                { "name": "chat-message", "data": "kept" }
            ]
        }))
        .unwrap();

        let messages = frame.chat_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].data, "kept");
        assert_eq!(messages[0].id, None);
    }

    #[test]
    fn test_error_info_display() {
        let info = ErrorInfo {
            code: Some(40140),
            status_code: Some(401),
            message: Some("Token expired".to_string()),
        };
        assert_eq!(info.to_string(), "Token expired (code 40140, status 401)");
    }
}
