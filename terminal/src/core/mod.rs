//! # Core Abstractions
//!
//! Core traits and error types for dependency injection and better testability.
//!
//! ## Modules
//!
//! - **[`error`]**: Application error types (`AppError`, `Result<T>`)
//! - **[`service`]**: Service traits for dependency injection (`ChatPublisher`, `CompletionApi`)
//!
//! ## Dependency Injection
//!
//! ```rust,ignore
//! use terminal::core::service::CompletionApi;
//!
//! // In production: the backend client
//! let api: Arc<dyn CompletionApi> = Arc::new(ApiClient::new(&config.api_base_url)?);
//!
//! // In tests: a stub that records prompts
//! let api: Arc<dyn CompletionApi> = Arc::new(StubCompletion::replying("4"));
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::{ChatPublisher, CompletionApi};
