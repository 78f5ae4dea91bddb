//! # REST Client
//!
//! Token exchange against the provider's REST API.

use crate::error::{RealtimeError, Result};
use crate::protocol::ErrorInfo;
use reqwest::Client;
use serde::Deserialize;
use shared::{TokenDetails, TokenRequest};
use std::time::Duration;
use tracing::{debug, info};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorInfo,
}

#[derive(Clone)]
pub struct RestClient {
    http: Client,
    base_url: String,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Exchange a signed token request for a token.
    pub async fn request_token(&self, request: &TokenRequest) -> Result<TokenDetails> {
        let url = format!("{}/keys/{}/requestToken", self.base_url, request.key_name);
        debug!("Requesting realtime token for client {:?}", request.client_id);

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error)
                .unwrap_or_else(|_| ErrorInfo {
                    code: None,
                    status_code: Some(status.as_u16()),
                    message: Some(body),
                });
            return Err(RealtimeError::Provider(error));
        }

        let details: TokenDetails = response.json().await?;
        info!("Realtime token issued, expires at {}", details.expires);
        Ok(details)
    }
}
