//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the chat client (`terminal`) and the
//! backend API, plus the chat message shape carried over the realtime channel.
//! All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects
//!   - **[`dto::chat`]**: Chat messages as published on the realtime channel
//!   - **[`dto::token`]**: Realtime token requests and token details
//!   - **[`dto::completion`]**: Completion proxy request/response bodies
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::preview`]**: Shorten message text for log lines
//!
//! ## Wire Format
//!
//! Realtime provider types (`ChatMessage`, `TokenRequest`, `TokenDetails`) use
//! **camelCase** field names because that is what the provider speaks. The proxy
//! bodies are single-field objects (`prompt`, `result`, `error`).
//!
//! ## Usage in Backend
//!
//! ```rust,ignore
//! use shared::dto::completion::{CompletionRequest, CompletionResponse};
//! use axum::Json;
//!
//! async fn complete(Json(request): Json<CompletionRequest>) -> Json<CompletionResponse> {
//!     # todo!()
//! }
//! ```
//!
//! ## Usage in Frontend
//!
//! ```rust,ignore
//! use shared::dto::completion::{CompletionRequest, CompletionResponse};
//!
//! let response: CompletionResponse = reqwest::Client::new()
//!     .post("http://localhost:3001/api/openai/route")
//!     .json(&CompletionRequest { prompt: "Hey OpenAI, hi".to_string() })
//!     .send()
//!     .await?
//!     .json()
//!     .await?;
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;
