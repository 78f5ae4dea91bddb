//! # Realtime Token Issuing
//!
//! [`TokenIssuer`] is the seam the token route calls through; [`AblyTokenIssuer`]
//! signs token requests locally with the provider API key.

use async_trait::async_trait;
use lib_core::{AppError, Config, Result};
use lib_realtime::{create_token_request, ApiKey, TokenParams};
use shared::TokenRequest;
use tracing::debug;

#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Mint a token request for the configured client identity.
    async fn create_token_request(&self) -> Result<TokenRequest>;
}

pub struct AblyTokenIssuer {
    key: Option<ApiKey>,
    params: TokenParams,
}

impl AblyTokenIssuer {
    /// Build from config. A missing key is accepted here and reported per request;
    /// a malformed key is rejected immediately.
    pub fn new(config: &Config) -> Result<Self> {
        let key = config
            .ably_api_key
            .as_deref()
            .map(ApiKey::parse)
            .transpose()
            .map_err(|e| AppError::Config(format!("ABLY_API_KEY: {}", e)))?;

        Ok(Self::with_key(key, &config.realtime_client_id))
    }

    pub fn with_key(key: Option<ApiKey>, client_id: &str) -> Self {
        Self {
            key,
            params: TokenParams::for_client(client_id),
        }
    }
}

#[async_trait]
impl TokenIssuer for AblyTokenIssuer {
    async fn create_token_request(&self) -> Result<TokenRequest> {
        let key = self
            .key
            .as_ref()
            .ok_or_else(|| AppError::Config("ABLY_API_KEY is not set".to_string()))?;

        let request = create_token_request(key, &self.params)
            .map_err(|e| AppError::Internal(format!("token request signing failed: {}", e)))?;

        debug!(
            key_name = %request.key_name,
            client_id = ?request.client_id,
            "Issued realtime token request"
        );
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_realtime::verify_token_request;

    #[tokio::test]
    async fn test_issues_verifiable_request_for_configured_client() {
        let config = Config {
            ably_api_key: Some("appId.keyId:secret".to_string()),
            ..Config::default()
        };
        let issuer = AblyTokenIssuer::new(&config).unwrap();

        let request = issuer.create_token_request().await.unwrap();

        assert_eq!(request.client_id.as_deref(), Some("grou"));
        let key = ApiKey::parse("appId.keyId:secret").unwrap();
        assert!(verify_token_request(&key, &request));
    }

    #[tokio::test]
    async fn test_missing_key_fails_on_use() {
        let issuer = AblyTokenIssuer::new(&Config::default()).unwrap();
        let err = issuer.create_token_request().await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_malformed_key_fails_at_construction() {
        let config = Config {
            ably_api_key: Some("not-a-key".to_string()),
            ..Config::default()
        };
        assert!(matches!(AblyTokenIssuer::new(&config), Err(AppError::Config(_))));
    }
}
