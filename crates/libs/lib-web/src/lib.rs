//! # Web Library
//!
//! HTTP surface of the chat relay: the realtime token issuer and the completion
//! proxy, plus middleware and the outbound services they call.

pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;

pub use server::{create_router, init_tracing, start_server, AppState, ServerConfig};
