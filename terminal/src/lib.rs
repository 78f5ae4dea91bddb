//! # Chat Terminal
//!
//! Native egui client for the realtime chat demo.
//!
//! Every client joins the `chat-demo` channel. Messages starting with
//! `"Hey OpenAI"` are also sent to the backend completion proxy, and the answer is
//! published back to the channel as `"OpenAI: <reply>"`.
//!
//! ## Modules
//!
//! - **[`app`]**: [`App`] orchestrator, state, events, chat rules, background tasks
//! - **[`config`]**: Endpoints from the environment
//! - **[`core`]**: Error type and service traits
//! - **[`logging`]**: File logging
//! - **[`services`]**: Backend HTTP client and realtime session
//! - **[`ui`]**: egui rendering

pub mod app;
pub mod config;
pub mod core;
pub mod logging;
pub mod services;
pub mod ui;

pub use crate::app::{App, AppEvent, AppState};
pub use crate::config::ClientConfig;
pub use crate::core::{AppError, Result};
