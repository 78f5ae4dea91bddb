//! # Middleware
//!
//! Axum middleware for request stamping, logging, and response mapping.
//!
//! ## Modules
//!
//! - **[`mw_req_stamp`]**: Request ID stamping
//! - **[`mw_logging`]**: Request/response logging with header redaction
//! - **[`mw_res_map`]**: Cache headers on API responses, server error logging

// region: --- Modules
pub mod mw_logging;
pub mod mw_req_stamp;
pub mod mw_res_map;
// endregion: --- Modules

// region: --- Re-exports
pub use mw_logging::log_requests;
pub use mw_req_stamp::{stamp_req, RequestStamp};
pub use mw_res_map::map_res;
// endregion: --- Re-exports
