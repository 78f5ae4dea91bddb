//! # Realtime Library
//!
//! Client adapter for the hosted realtime messaging provider (Ably).
//!
//! The provider does the actual fan-out; this crate only speaks to it:
//!
//! - **[`auth`]**: API key parsing and HMAC-signed token requests (server side)
//! - **[`rest`]**: Exchange a token request for a token (client side)
//! - **[`protocol`]**: JSON protocol messages spoken over the realtime websocket
//! - **[`connection`]**: Websocket connection, channel attach and publish
//!
//! ## Flow
//!
//! ```text
//! backend                     chat terminal                       provider
//!   │ create_token_request()      │                                   │
//!   │◄──── GET /api/route ────────│                                   │
//!   │───── TokenRequest ─────────►│── POST /keys/{name}/requestToken ►│
//!   │                             │◄──────── TokenDetails ────────────│
//!   │                             │── wss:// ?accessToken=… ─────────►│
//!   │                             │◄──────── CONNECTED ───────────────│
//!   │                             │── ATTACH / MESSAGE ──────────────►│
//! ```

pub mod auth;
pub mod connection;
pub mod error;
pub mod protocol;
pub mod rest;

pub use auth::{create_token_request, verify_token_request, ApiKey, TokenParams};
pub use connection::{Channel, RealtimeConnection, RealtimeEvent};
pub use error::{RealtimeError, Result};
pub use protocol::{Action, ErrorInfo, ProtocolMessage};
pub use rest::RestClient;
