//! # Services Module
//!
//! Network integrations for the chat terminal.
//!
//! ```text
//! services/
//! ├── api/         - Backend HTTP client (token and completion routes)
//! └── realtime.rs  - Chat session over the realtime provider
//! ```
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                    Chat Terminal                     │
//! │   ┌──────────────┐             ┌──────────────────┐  │
//! │   │  ApiClient   │             │   ChatSession    │  │
//! │   └──────┬───────┘             └────────┬─────────┘  │
//! └──────────┼──────────────────────────────┼────────────┘
//!            │ HTTP/JSON                    │ WebSocket
//!            ▼                              ▼
//! ┌─────────────────────┐      ┌──────────────────────────┐
//! │  Backend            │      │  Realtime provider       │
//! │  /api/route         │      │  channel "chat-demo"     │
//! │  /api/openai/route  │      │                          │
//! └─────────────────────┘      └──────────────────────────┘
//! ```

pub mod api;
pub mod realtime;

pub use api::ApiClient;
pub use realtime::{connect_chat, ChatSession};
