//! # Data Transfer Objects (DTOs)
//!
//! ## Module Organization
//!
//! - [`chat`] - Realtime chat messages and channel constants
//! - [`token`] - Token request issued by the backend, token details issued by the provider
//! - [`completion`] - Completion proxy bodies
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/openai/route
//! Content-Type: application/json
//!
//! { "prompt": "Hey OpenAI, what is 2+2?" }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! { "result": "2+2 equals 4." }
//! ```
//!
//! ```text
//! HTTP/1.1 500 Internal Server Error
//! Content-Type: application/json
//!
//! { "error": "An error occurred during your request." }
//! ```

pub mod chat;
pub mod completion;
pub mod token;

pub use chat::*;
pub use completion::*;
pub use token::*;
