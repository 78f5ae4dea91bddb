//! # Application Configuration
//!
//! Configuration for the token issuer and the completion proxy, loaded from
//! environment variables.
//!
//! Provider API keys are *not* required at startup: a missing `ABLY_API_KEY` only
//! surfaces when the token route is hit, and a missing `OPENAI_API_KEY` surfaces as
//! the provider's own 401. Numeric settings that fail to parse do abort startup.
//!
//! The config is built once in `main` and handed to the server by value; there is no
//! global instance.

use crate::error::{AppError, Result};
use lib_utils::envs::{get_env_opt, get_env_or, get_env_parse_or};
use tracing::warn;

/// Default chat completion model
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Default OpenAI-compatible API root
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Client identity every token request is scoped to
pub const DEFAULT_REALTIME_CLIENT_ID: &str = "grou";

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// Realtime provider API key, `keyName:keySecret`
    pub ably_api_key: Option<String>,

    /// Bearer key for the completion API
    pub openai_api_key: Option<String>,

    /// Model name sent with every completion request
    pub openai_model: String,

    /// API root, without the trailing `/chat/completions`
    pub openai_base_url: String,

    /// Per-attempt timeout for completion calls
    ///
    /// Valid range: 1-600 seconds
    pub openai_timeout_secs: u64,

    /// Retries after the first failed attempt (0 disables retrying)
    ///
    /// Valid range: 0-10
    pub openai_max_retries: u32,

    /// Client id embedded in issued token requests
    pub realtime_client_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ably_api_key: None,
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_timeout_secs: 30,
            openai_max_retries: 2,
            realtime_client_id: DEFAULT_REALTIME_CLIENT_ID.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let ably_api_key = get_env_opt("ABLY_API_KEY");
        if ably_api_key.is_none() {
            warn!("ABLY_API_KEY is not set; token requests will fail until it is");
        }

        let openai_api_key = get_env_opt("OPENAI_API_KEY");
        if openai_api_key.is_none() {
            warn!("OPENAI_API_KEY is not set; completion requests will be rejected by the provider");
        }

        let openai_timeout_secs = get_env_parse_or("OPENAI_TIMEOUT_SECS", defaults.openai_timeout_secs)
            .map_err(|e| AppError::Config(format!("OPENAI_TIMEOUT_SECS must be a number of seconds: {}", e)))?;

        let openai_max_retries = get_env_parse_or("OPENAI_MAX_RETRIES", defaults.openai_max_retries)
            .map_err(|e| AppError::Config(format!("OPENAI_MAX_RETRIES must be a whole number: {}", e)))?;

        Ok(Self {
            ably_api_key,
            openai_api_key,
            openai_model: get_env_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            openai_base_url: get_env_or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            openai_timeout_secs,
            openai_max_retries,
            realtime_client_id: get_env_or("REALTIME_CLIENT_ID", DEFAULT_REALTIME_CLIENT_ID),
        })
    }

    /// Validate tunables. API keys are deliberately left unchecked.
    pub fn validate(&self) -> Result<()> {
        if self.openai_timeout_secs < 1 || self.openai_timeout_secs > 600 {
            return Err(AppError::Config(
                "OPENAI_TIMEOUT_SECS must be between 1 and 600".to_string(),
            ));
        }

        if self.openai_max_retries > 10 {
            return Err(AppError::Config(
                "OPENAI_MAX_RETRIES must be at most 10".to_string(),
            ));
        }

        if self.openai_model.trim().is_empty() {
            return Err(AppError::Config("OPENAI_MODEL cannot be empty".to_string()));
        }

        Ok(())
    }
}
