//! # Realtime Tasks
//!
//! Connects to the chat channel and forwards realtime events to the UI thread.

use crate::app::events::AppEvent;
use crate::config::ClientConfig;
use crate::services::{connect_chat, ApiClient, ChatSession};
use async_channel::Sender;
use lib_realtime::RealtimeEvent;
use shared::CHAT_CHANNEL;
use std::sync::Arc;
use tokio::spawn;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Bring up the chat session, then pump its events until the connection closes
/// or the UI goes away.
pub(crate) fn connect(api: ApiClient, config: ClientConfig, event_tx: Sender<AppEvent>) -> JoinHandle<()> {
    spawn(async move {
        let (session, mut events) = match connect_chat(&api, &config).await {
            Ok(connected) => connected,
            Err(e) => {
                error!(error = %e, "Failed to connect to chat");
                let _ = event_tx.send(AppEvent::ConnectFailed(e.to_string())).await;
                return;
            }
        };

        let ChatSession { connection, channel } = session;
        let connected = AppEvent::Connected {
            connection_id: connection.connection_id().to_string(),
            publisher: Arc::new(channel),
        };
        if event_tx.send(connected).await.is_err() {
            let _ = connection.close();
            return;
        }

        if !forward_events(&mut events, &event_tx).await {
            debug!("UI gone; closing realtime connection");
            let _ = connection.close();
        }

        info!(connection_id = %connection.connection_id(), "Realtime event stream ended");
    })
}

/// Forward events until the stream ends. The UI always sees a close: one is
/// synthesized if the stream ends without reporting it. Returns `false` once the UI
/// has dropped its receiver.
async fn forward_events(events: &mut mpsc::UnboundedReceiver<RealtimeEvent>, event_tx: &Sender<AppEvent>) -> bool {
    let mut closed_reported = false;

    while let Some(event) = events.recv().await {
        let Some(app_event) = to_app_event(event) else {
            continue;
        };
        closed_reported |= matches!(app_event, AppEvent::ConnectionClosed(_));
        if event_tx.send(app_event).await.is_err() {
            return false;
        }
    }

    closed_reported || event_tx.send(AppEvent::ConnectionClosed(None)).await.is_ok()
}

fn to_app_event(event: RealtimeEvent) -> Option<AppEvent> {
    match event {
        RealtimeEvent::Attached { channel } => Some(AppEvent::ChannelAttached(channel)),
        RealtimeEvent::Message { channel, message } if channel == CHAT_CHANNEL => {
            Some(AppEvent::MessageReceived(message))
        }
        RealtimeEvent::Message { channel, .. } => {
            debug!(channel = %channel, "Ignoring message from another channel");
            None
        }
        RealtimeEvent::Nack { msg_serial, count, error } => {
            warn!(msg_serial, count, error = ?error, "Publish rejected");
            None
        }
        RealtimeEvent::Error(info) => Some(AppEvent::RealtimeError(info.to_string())),
        RealtimeEvent::Closed(info) => Some(AppEvent::ConnectionClosed(info.map(|i| i.to_string()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_realtime::ErrorInfo;
    use shared::ChatMessage;

    #[test]
    fn test_chat_channel_messages_are_forwarded() {
        let event = RealtimeEvent::Message {
            channel: CHAT_CHANNEL.to_string(),
            message: ChatMessage::new("hi"),
        };

        match to_app_event(event) {
            Some(AppEvent::MessageReceived(message)) => assert_eq!(message.data, "hi"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_other_channels_and_nacks_are_dropped() {
        let foreign = RealtimeEvent::Message {
            channel: "elsewhere".to_string(),
            message: ChatMessage::new("hi"),
        };
        let nack = RealtimeEvent::Nack { msg_serial: 3, count: 1, error: None };

        assert!(to_app_event(foreign).is_none());
        assert!(to_app_event(nack).is_none());
    }

    #[test]
    fn test_close_reason_is_rendered() {
        let closed = RealtimeEvent::Closed(Some(ErrorInfo {
            code: Some(40142),
            status_code: Some(401),
            message: Some("Token expired".to_string()),
        }));

        match to_app_event(closed) {
            Some(AppEvent::ConnectionClosed(Some(reason))) => assert!(reason.starts_with("Token expired")),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    fn drain(rx: &async_channel::Receiver<AppEvent>) -> Vec<AppEvent> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    #[tokio::test]
    async fn test_stream_ending_without_close_reports_closed() {
        let (tx, mut events) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = async_channel::unbounded();
        tx.send(RealtimeEvent::Attached { channel: CHAT_CHANNEL.to_string() }).unwrap();
        drop(tx);

        assert!(forward_events(&mut events, &event_tx).await);

        let forwarded = drain(&event_rx);
        assert_eq!(forwarded.len(), 2);
        assert!(matches!(&forwarded[0], AppEvent::ChannelAttached(channel) if channel == CHAT_CHANNEL));
        assert!(matches!(forwarded[1], AppEvent::ConnectionClosed(None)));
    }

    #[tokio::test]
    async fn test_reported_close_is_not_repeated() {
        let (tx, mut events) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = async_channel::unbounded();
        tx.send(RealtimeEvent::Closed(Some(ErrorInfo {
            code: Some(80019),
            status_code: None,
            message: Some("Connection lost".to_string()),
        })))
        .unwrap();
        drop(tx);

        assert!(forward_events(&mut events, &event_tx).await);

        let forwarded = drain(&event_rx);
        assert_eq!(forwarded.len(), 1);
        assert!(matches!(&forwarded[0], AppEvent::ConnectionClosed(Some(reason)) if reason.starts_with("Connection lost")));
    }

    #[tokio::test]
    async fn test_forwarding_stops_when_ui_is_gone() {
        let (tx, mut events) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = async_channel::unbounded();
        drop(event_rx);
        tx.send(RealtimeEvent::Attached { channel: CHAT_CHANNEL.to_string() }).unwrap();

        assert!(!forward_events(&mut events, &event_tx).await);
    }
}
