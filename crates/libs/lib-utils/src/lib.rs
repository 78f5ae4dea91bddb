//! # Utilities Library
//!
//! Shared utility functions for base64 encoding, environment variables and time.

pub mod b64;
pub mod envs;
pub mod time;

// Re-export commonly used functions
pub use b64::{b64_encode, b64_decode};
pub use envs::{get_env, get_env_opt, get_env_or, get_env_parse_or};
pub use time::{now_millis, now_utc};
