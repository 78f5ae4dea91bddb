//! # Application State
//!
//! Everything the chat screen renders from. Lives behind `Arc<RwLock<AppState>>`;
//! the UI thread is the only writer, async tasks report through [`AppEvent`](super::AppEvent).

use super::history::MessageHistory;
use crate::core::service::ChatPublisher;
use std::sync::Arc;

/// Realtime connection lifecycle as shown in the header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Connected,
    /// Bootstrap failed; the message is shown verbatim.
    Failed(String),
    /// The provider closed the connection, with its reason when given.
    Closed(Option<String>),
}

impl ConnectionStatus {
    pub fn label(&self) -> String {
        match self {
            ConnectionStatus::Connecting => "○ Connecting...".to_string(),
            ConnectionStatus::Connected => "● Connected".to_string(),
            ConnectionStatus::Failed(reason) => format!("✖ Connection failed: {}", reason),
            ConnectionStatus::Closed(Some(reason)) => format!("○ Disconnected: {}", reason),
            ConnectionStatus::Closed(None) => "○ Disconnected".to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct AppState {
    /// Text in the input box
    pub draft: String,
    pub history: MessageHistory,
    pub status: ConnectionStatus,
    /// Provider connection id once connected; decides which messages are "me".
    pub connection_id: Option<String>,
    pub publisher: Option<Arc<dyn ChatPublisher>>,
    /// Give the input keyboard focus on the next frame.
    pub focus_input: bool,
    /// Scroll the history to its end on the next frame.
    pub scroll_to_bottom: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            focus_input: true,
            ..Self::default()
        }
    }
}
