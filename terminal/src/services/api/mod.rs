//! # Backend API Client Module
//!
//! HTTP client for the backend's two routes.
//!
//! ```text
//! api/
//! ├── mod.rs        - Module exports
//! ├── client.rs     - ApiClient struct and error mapping
//! ├── token.rs      - GET  /api/route
//! └── completion.rs - POST /api/openai/route
//! ```

pub mod client;
pub mod completion;
pub mod token;

pub use client::ApiClient;
pub use completion::complete;
pub use token::fetch_token_request;
