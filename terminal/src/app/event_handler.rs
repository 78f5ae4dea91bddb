//! # Event Handler
//!
//! Applies [`AppEvent`]s from background tasks to the state. Runs on the UI thread.

use crate::app::{App, AppEvent, ConnectionStatus};

impl App {
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Connected { connection_id, publisher } => {
                tracing::info!(connection_id = %connection_id, "Connected to chat");
                let mut state = self.state.write();
                state.status = ConnectionStatus::Connected;
                state.connection_id = Some(connection_id);
                state.publisher = Some(publisher);
            }
            AppEvent::ConnectFailed(reason) => {
                self.state.write().status = ConnectionStatus::Failed(reason);
            }
            AppEvent::MessageReceived(message) => {
                tracing::debug!(id = ?message.id, connection_id = ?message.connection_id, "Message received");
                let mut state = self.state.write();
                state.history.push(message);
                state.scroll_to_bottom = true;
            }
            AppEvent::ChannelAttached(channel) => {
                tracing::debug!(channel = %channel, "Channel attached");
            }
            AppEvent::ConnectionClosed(reason) => {
                tracing::warn!(reason = ?reason, "Realtime connection closed");
                let mut state = self.state.write();
                state.status = ConnectionStatus::Closed(reason);
                state.publisher = None;
            }
            AppEvent::RealtimeError(error) => {
                tracing::warn!(error = %error, "Realtime error");
            }
        }
    }
}
