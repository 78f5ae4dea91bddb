//! # Application Events
//!
//! Results sent from background tasks to the UI thread.

use crate::core::service::ChatPublisher;
use shared::ChatMessage;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Realtime session is up and attached
    Connected {
        connection_id: String,
        publisher: Arc<dyn ChatPublisher>,
    },
    /// Token fetch, token exchange or websocket handshake failed
    ConnectFailed(String),
    /// A message arrived on the chat channel (including our own)
    MessageReceived(ChatMessage),
    ChannelAttached(String),
    /// Terminal; the connection is gone
    ConnectionClosed(Option<String>),
    /// Non-fatal provider error
    RealtimeError(String),
}
