//! # Services Layer
//!
//! Outbound integrations the handlers call through. Each is a trait (the seam
//! handlers and tests see) plus the production implementation:
//!
//! ```text
//! Handlers (HTTP) → Services (traits) → Realtime provider / completion API
//! ```
//!
//! - [`realtime_auth`] - [`TokenIssuer`] / [`AblyTokenIssuer`]
//! - [`completion`] - [`CompletionModel`] / [`OpenAiClient`]
//! - [`retry`] - backoff policy used by the completion client

pub mod completion;
pub mod realtime_auth;
pub mod retry;

pub use completion::{CompletionModel, OpenAiClient};
pub use realtime_auth::{AblyTokenIssuer, TokenIssuer};
pub use retry::RetryPolicy;
