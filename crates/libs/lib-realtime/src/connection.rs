//! # Realtime Connection
//!
//! One websocket per client. [`RealtimeConnection::connect`] completes the handshake
//! (waits for CONNECTED, which carries the connection id), then hands the socket to a
//! reader task and a writer task:
//!
//! - the writer drains an unbounded queue of [`ProtocolMessage`]s, so [`Channel`]
//!   handles can publish from sync code (the egui thread) without blocking
//! - the reader turns frames into [`RealtimeEvent`]s on the returned receiver
//!
//! There is no automatic reconnect; a dropped connection is reported as
//! [`RealtimeEvent::Closed`].

use crate::error::{RealtimeError, Result};
use crate::protocol::{Action, ErrorInfo, ProtocolMessage};
use futures_util::{SinkExt, Stream, StreamExt};
use reqwest::Url;
use shared::ChatMessage;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite, tungstenite::Message};
use tracing::{debug, info, trace, warn};

const PROTOCOL_VERSION: &str = "1.2";
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(15);

/// What the reader task reports.
#[derive(Debug, Clone, PartialEq)]
pub enum RealtimeEvent {
    Attached { channel: String },
    Message { channel: String, message: ChatMessage },
    /// Publishes `msg_serial..msg_serial + count` were rejected.
    Nack {
        msg_serial: u64,
        count: u64,
        error: Option<ErrorInfo>,
    },
    Error(ErrorInfo),
    /// Terminal; nothing follows.
    Closed(Option<ErrorInfo>),
}

/// An established connection. Dropping it (and every [`Channel`]) closes the socket.
pub struct RealtimeConnection {
    connection_id: String,
    outbound: mpsc::UnboundedSender<ProtocolMessage>,
    msg_serial: Arc<AtomicU64>,
}

impl RealtimeConnection {
    /// Open a websocket authenticated with `access_token` and wait for CONNECTED.
    pub async fn connect(
        realtime_url: &str,
        access_token: &str,
    ) -> Result<(Self, mpsc::UnboundedReceiver<RealtimeEvent>)> {
        let url = connect_url(realtime_url, access_token)?;
        info!(host = ?url.host_str(), "Connecting to realtime service");

        let (ws_stream, response) = connect_async(url.as_str()).await?;
        debug!(status = ?response.status(), "Realtime websocket upgraded");

        let (mut write, mut read) = ws_stream.split();

        let connected = tokio::time::timeout(HANDSHAKE_TIMEOUT, wait_for_connected(&mut read))
            .await
            .map_err(|_| RealtimeError::Protocol("timed out waiting for CONNECTED".to_string()))??;

        let connection_id = connected
            .connection_id
            .clone()
            .ok_or_else(|| RealtimeError::Protocol("CONNECTED without connectionId".to_string()))?;
        let client_id = connected
            .connection_details
            .as_ref()
            .and_then(|details| details.client_id.as_deref());

        info!(connection_id = %connection_id, client_id = ?client_id, "Realtime connection established");

        let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<ProtocolMessage>();
        let (events_tx, events_rx) = mpsc::unbounded_channel::<RealtimeEvent>();

        tokio::spawn(async move {
            while let Some(frame) = outbound_rx.recv().await {
                let closing = frame.action == Action::Close;
                let text = match serde_json::to_string(&frame) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(error = %e, "Dropping unserializable protocol message");
                        continue;
                    }
                };

                trace!(action = ?frame.action, "Sending protocol message");
                if let Err(e) = write.send(Message::Text(text)).await {
                    warn!(error = %e, "Realtime websocket write failed");
                    break;
                }
                if closing {
                    break;
                }
            }
            let _ = write.close().await;
            debug!("Realtime writer task finished");
        });

        tokio::spawn(async move {
            let mut closed_reported = false;

            while let Some(frame) = read.next().await {
                let text = match frame {
                    Ok(Message::Text(text)) => text,
                    Ok(Message::Close(close)) => {
                        debug!(frame = ?close, "Realtime websocket closed by server");
                        break;
                    }
                    Ok(_) => continue,
                    Err(e) => {
                        warn!(error = %e, "Realtime websocket read failed");
                        break;
                    }
                };

                let frame: ProtocolMessage = match serde_json::from_str(&text) {
                    Ok(frame) => frame,
                    Err(e) => {
                        warn!(error = %e, "Ignoring malformed protocol message");
                        continue;
                    }
                };

                for event in events_for(frame) {
                    closed_reported |= matches!(event, RealtimeEvent::Closed(_));
                    if events_tx.send(event).is_err() {
                        debug!("Realtime event receiver dropped");
                        return;
                    }
                }

                if closed_reported {
                    break;
                }
            }

            if !closed_reported {
                let _ = events_tx.send(RealtimeEvent::Closed(None));
            }
        });

        Ok((
            Self {
                connection_id,
                outbound,
                msg_serial: Arc::new(AtomicU64::new(0)),
            },
            events_rx,
        ))
    }

    /// Connection id assigned by the provider; stamped on every message this
    /// connection publishes.
    pub fn connection_id(&self) -> &str {
        &self.connection_id
    }

    pub fn channel(&self, name: &str) -> Channel {
        Channel {
            name: name.to_string(),
            outbound: self.outbound.clone(),
            msg_serial: Arc::clone(&self.msg_serial),
        }
    }

    /// Ask the provider to close the connection.
    pub fn close(&self) -> Result<()> {
        self.outbound
            .send(ProtocolMessage::close())
            .map_err(|_| RealtimeError::Closed)
    }
}

/// Handle for one channel on a connection. Cheap to clone.
#[derive(Clone)]
pub struct Channel {
    name: String,
    outbound: mpsc::UnboundedSender<ProtocolMessage>,
    msg_serial: Arc<AtomicU64>,
}

impl Channel {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attach(&self) -> Result<()> {
        debug!(channel = %self.name, "Attaching to channel");
        self.outbound
            .send(ProtocolMessage::attach(&self.name))
            .map_err(|_| RealtimeError::Closed)
    }

    /// Queue `message` for publishing. Delivery (including back to this client)
    /// arrives later as [`RealtimeEvent::Message`].
    pub fn publish(&self, message: &ChatMessage) -> Result<()> {
        let serial = self.msg_serial.fetch_add(1, Ordering::Relaxed);
        let frame = ProtocolMessage::publish(&self.name, serial, message)?;
        self.outbound.send(frame).map_err(|_| RealtimeError::Closed)
    }
}

fn connect_url(realtime_url: &str, access_token: &str) -> Result<Url> {
    let base = format!("{}/", realtime_url.trim_end_matches('/'));
    Url::parse_with_params(
        &base,
        &[
            ("v", PROTOCOL_VERSION),
            ("format", "json"),
            ("heartbeats", "true"),
            ("accessToken", access_token),
        ],
    )
    .map_err(|e| RealtimeError::Protocol(format!("invalid realtime url {}: {}", realtime_url, e)))
}

async fn wait_for_connected<S>(read: &mut S) -> Result<ProtocolMessage>
where
    S: Stream<Item = std::result::Result<Message, tungstenite::Error>> + Unpin,
{
    while let Some(frame) = read.next().await {
        match frame? {
            Message::Text(text) => {
                let frame: ProtocolMessage = serde_json::from_str(&text)?;
                match frame.action {
                    Action::Connected => return Ok(frame),
                    Action::Error | Action::Disconnected | Action::Closed => {
                        return Err(RealtimeError::Provider(frame.error.unwrap_or_default()));
                    }
                    other => trace!(action = ?other, "Ignoring frame before CONNECTED"),
                }
            }
            Message::Close(_) => return Err(RealtimeError::Closed),
            _ => {}
        }
    }
    Err(RealtimeError::Closed)
}

/// Map one inbound frame to the events the application cares about.
fn events_for(frame: ProtocolMessage) -> Vec<RealtimeEvent> {
    match frame.action {
        Action::Message => {
            let channel = frame.channel.clone().unwrap_or_default();
            frame
                .chat_messages()
                .into_iter()
                .map(|message| RealtimeEvent::Message {
                    channel: channel.clone(),
                    message,
                })
                .collect()
        }
        Action::Attached => vec![RealtimeEvent::Attached {
            channel: frame.channel.unwrap_or_default(),
        }],
        Action::Nack => vec![RealtimeEvent::Nack {
            msg_serial: frame.msg_serial.unwrap_or_default(),
            count: frame.count.unwrap_or(1),
            error: frame.error,
        }],
        Action::Error => vec![RealtimeEvent::Error(frame.error.unwrap_or_default())],
        Action::Disconnected | Action::Closed => vec![RealtimeEvent::Closed(frame.error)],
        Action::Detached => {
            warn!(channel = ?frame.channel, error = ?frame.error, "Channel detached");
            frame.error.map(RealtimeEvent::Error).into_iter().collect()
        }
        other => {
            trace!(action = ?other, "Ignoring protocol message");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use serde_json::json;

    fn frame(value: serde_json::Value) -> ProtocolMessage {
        serde_json::from_value(value).unwrap()
    }

    fn text(value: serde_json::Value) -> std::result::Result<Message, tungstenite::Error> {
        Ok(Message::Text(value.to_string()))
    }

    #[test]
    fn test_connect_url_carries_token_and_format() {
        let url = connect_url("wss://realtime.example.com/", "tok en/+").unwrap();
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(url.host_str(), Some("realtime.example.com"));
        assert!(query.contains(&("format".to_string(), "json".to_string())));
        assert!(query.contains(&("v".to_string(), "1.2".to_string())));
        assert!(query.contains(&("accessToken".to_string(), "tok en/+".to_string())));
    }

    #[tokio::test]
    async fn test_wait_for_connected_skips_heartbeats() {
        let mut frames = stream::iter(vec![
            text(json!({ "action": 0 })),
            text(json!({ "action": 4, "connectionId": "conn-1", "connectionDetails": { "clientId": "grou" } })),
        ]);

        let connected = wait_for_connected(&mut frames).await.unwrap();
        assert_eq!(connected.connection_id.as_deref(), Some("conn-1"));
    }

    #[tokio::test]
    async fn test_wait_for_connected_reports_auth_failure() {
        let mut frames = stream::iter(vec![text(json!({
            "action": 9,
            "error": { "code": 40140, "statusCode": 401, "message": "Token expired" }
        }))]);

        let err = wait_for_connected(&mut frames).await.unwrap_err();
        assert!(matches!(err, RealtimeError::Provider(info) if info.code == Some(40140)));
    }

    #[tokio::test]
    async fn test_wait_for_connected_on_empty_stream() {
        let mut frames = stream::iter(Vec::<std::result::Result<Message, tungstenite::Error>>::new());
        assert!(matches!(wait_for_connected(&mut frames).await, Err(RealtimeError::Closed)));
    }

    #[test]
    fn test_message_frame_yields_one_event_per_message() {
        let events = events_for(frame(json!({
            "action": 15,
            "id": "conn-2:0",
            "channel": "chat-demo",
            "connectionId": "conn-2",
            "messages": [
                { "name": "chat-message", "data": "a" },
                { "name": "chat-message", "data": "b" }
            ]
        })));

        assert_eq!(events.len(), 2);
        match &events[1] {
            RealtimeEvent::Message { channel, message } => {
                assert_eq!(channel, "chat-demo");
                assert_eq!(message.data, "b");
                assert_eq!(message.connection_id.as_deref(), Some("conn-2"));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_nack_reports_serial_range() {
        let events = events_for(frame(json!({ "action": 2, "msgSerial": 4, "count": 2 })));
        assert_eq!(
            events,
            vec![RealtimeEvent::Nack { msg_serial: 4, count: 2, error: None }]
        );

        let events = events_for(frame(json!({ "action": 2, "msgSerial": 7 })));
        assert_eq!(
            events,
            vec![RealtimeEvent::Nack { msg_serial: 7, count: 1, error: None }]
        );
    }

    #[test]
    fn test_nack_at_the_top_of_the_serial_space() {
        let events = events_for(frame(json!({
            "action": 2,
            "msgSerial": u64::MAX,
            "count": u64::MAX,
        })));
        assert_eq!(
            events,
            vec![RealtimeEvent::Nack { msg_serial: u64::MAX, count: u64::MAX, error: None }]
        );
    }

    #[test]
    fn test_lifecycle_frames() {
        assert_eq!(
            events_for(frame(json!({ "action": 11, "channel": "chat-demo" }))),
            vec![RealtimeEvent::Attached { channel: "chat-demo".to_string() }]
        );
        assert_eq!(
            events_for(frame(json!({ "action": 8 }))),
            vec![RealtimeEvent::Closed(None)]
        );
        assert!(events_for(frame(json!({ "action": 0 }))).is_empty());
        assert!(events_for(frame(json!({ "action": 1, "msgSerial": 0 }))).is_empty());
    }

    #[test]
    fn test_channel_publish_increments_serial() {
        let (outbound, mut rx) = mpsc::unbounded_channel();
        let channel = Channel {
            name: "chat-demo".to_string(),
            outbound,
            msg_serial: Arc::new(AtomicU64::new(0)),
        };

        channel.publish(&ChatMessage::new("one")).unwrap();
        channel.clone().publish(&ChatMessage::new("two")).unwrap();

        assert_eq!(rx.try_recv().unwrap().msg_serial, Some(0));
        assert_eq!(rx.try_recv().unwrap().msg_serial, Some(1));
    }

    #[test]
    fn test_publish_after_close_fails() {
        let (outbound, rx) = mpsc::unbounded_channel();
        drop(rx);
        let channel = Channel {
            name: "chat-demo".to_string(),
            outbound,
            msg_serial: Arc::new(AtomicU64::new(0)),
        };
        assert!(matches!(channel.publish(&ChatMessage::new("x")), Err(RealtimeError::Closed)));
    }
}
