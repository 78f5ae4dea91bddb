//! # Realtime Chat Session
//!
//! Brings up an authenticated connection to the shared chat channel:
//!
//! ```text
//! GET /api/route ──► TokenRequest ──► POST {rest}/keys/{name}/requestToken ──► TokenDetails
//!                                                                                 │
//!                        channel("chat-demo").attach() ◄── connect(realtime, token)
//! ```

use crate::config::ClientConfig;
use crate::core::error::Result;
use crate::services::api::{fetch_token_request, ApiClient};
use lib_realtime::{Channel, RealtimeConnection, RealtimeEvent, RestClient};
use shared::CHAT_CHANNEL;
use tokio::sync::mpsc;

/// A live connection plus its handle on the chat channel.
///
/// Dropping the session closes the socket once every clone of [`ChatSession::channel`]
/// is gone too.
pub struct ChatSession {
    pub connection: RealtimeConnection,
    pub channel: Channel,
}

/// Authenticate through the backend, connect, and attach to the chat channel.
pub async fn connect_chat(
    api: &ApiClient,
    config: &ClientConfig,
) -> Result<(ChatSession, mpsc::UnboundedReceiver<RealtimeEvent>)> {
    let token_request = fetch_token_request(api).await?;

    let rest = RestClient::new(&config.rest_url)?;
    let token = rest.request_token(&token_request).await?;
    tracing::debug!(expires = token.expires, client_id = ?token.client_id, "Realtime token issued");

    let (connection, events) = RealtimeConnection::connect(&config.realtime_url, &token.token).await?;
    let channel = connection.channel(CHAT_CHANNEL);
    channel.attach()?;

    tracing::info!(
        connection_id = %connection.connection_id(),
        channel = %CHAT_CHANNEL,
        "Chat session established"
    );

    Ok((ChatSession { connection, channel }, events))
}
