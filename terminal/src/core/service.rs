//! # Service Traits
//!
//! Traits for dependency injection. The app only talks to the network through these,
//! so tests swap in recording stubs.

use crate::core::error::Result;
use async_trait::async_trait;
use shared::ChatMessage;
use std::fmt;

/// Publishes chat messages to the realtime channel.
///
/// Publishing is fire-and-forget: the call only queues the message; delivery
/// (including back to this client) arrives through the receive path.
pub trait ChatPublisher: Send + Sync {
    fn publish(&self, message: ChatMessage) -> Result<()>;
}

impl fmt::Debug for dyn ChatPublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChatPublisher")
    }
}

/// Calls the backend completion proxy.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    /// Forward `prompt` and return the model's reply text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

impl ChatPublisher for lib_realtime::Channel {
    fn publish(&self, message: ChatMessage) -> Result<()> {
        lib_realtime::Channel::publish(self, &message).map_err(Into::into)
    }
}
