//! # Client Configuration
//!
//! Endpoints the chat terminal talks to, read from the environment once at startup.
//!
//! | Variable | Default |
//! |---|---|
//! | `API_BASE_URL` | `http://127.0.0.1:3001` |
//! | `ABLY_REST_HOST` | `rest.ably.io` |
//! | `ABLY_REALTIME_HOST` | `realtime.ably.io` |
//!
//! Hosts may be given with a scheme (`http://localhost:8080`) to point at a local
//! stand-in; bare hosts get `https://` and `wss://`.

/// Default backend address
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:3001";

const DEFAULT_REST_HOST: &str = "rest.ably.io";
const DEFAULT_REALTIME_HOST: &str = "realtime.ably.io";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend serving the token and completion routes
    pub api_base_url: String,
    /// Realtime provider REST root
    pub rest_url: String,
    /// Realtime provider websocket root
    pub realtime_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            rest_url: with_scheme(DEFAULT_REST_HOST, "https"),
            realtime_url: with_scheme(DEFAULT_REALTIME_HOST, "wss"),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let api_base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let rest_host = std::env::var("ABLY_REST_HOST")
            .unwrap_or_else(|_| DEFAULT_REST_HOST.to_string());
        let realtime_host = std::env::var("ABLY_REALTIME_HOST")
            .unwrap_or_else(|_| DEFAULT_REALTIME_HOST.to_string());

        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            rest_url: with_scheme(&rest_host, "https"),
            realtime_url: with_scheme(&realtime_host, "wss"),
        }
    }
}

fn with_scheme(host: &str, scheme: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.contains("://") {
        host.to_string()
    } else {
        format!("{}://{}", scheme, host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "http://127.0.0.1:3001");
        assert_eq!(config.rest_url, "https://rest.ably.io");
        assert_eq!(config.realtime_url, "wss://realtime.ably.io");
    }

    #[test]
    fn test_explicit_scheme_is_kept() {
        assert_eq!(with_scheme("ws://localhost:8080/", "wss"), "ws://localhost:8080");
        assert_eq!(with_scheme("sandbox-rest.ably.io", "https"), "https://sandbox-rest.ably.io");
    }
}
