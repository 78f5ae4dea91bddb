//! # HTTP Request Handlers
//!
//! Axum handlers, one module per endpoint. Handlers extract their service from
//! [`crate::AppState`] via `FromRef` and delegate to it.
//!
//! - **[`token`]**: realtime token issuing
//!   - `GET /api/route` (alias `GET /api`)
//! - **[`completion`]**: completion proxy
//!   - `POST /api/openai/route` (alias `POST /api/openai`)

pub mod completion;
pub mod token;

#[cfg(test)]
mod tests;

pub use completion::complete;
pub use token::issue_token;
