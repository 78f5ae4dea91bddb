//! # Core Library
//!
//! Configuration and error types shared by the web layer and the binaries.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
