//! # API Client
//!
//! HTTP client for the backend's token and completion routes.

use crate::core::error::{AppError, Result};
use crate::core::service::CompletionApi;
use reqwest::{Client, Response};
use shared::ErrorResponse;
use std::time::Duration;

/// Completions can take a while; the backend itself gives up after its own timeout
/// and retries.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// HTTP client for communicating with the backend API server.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success reply into an [`AppError::Api`] carrying the backend's
    /// `error` payload when there is one.
    pub(crate) async fn error_from(response: Response) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(ErrorResponse { error: serde_json::Value::String(message) }) => {
                AppError::Api(format!("{} ({})", message, status.as_u16()))
            }
            Ok(ErrorResponse { error }) => AppError::Api(format!("{} ({})", error, status.as_u16())),
            Err(_) => AppError::Api(format!("HTTP {}: {}", status.as_u16(), body)),
        }
    }
}

#[async_trait::async_trait]
impl CompletionApi for ApiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        crate::services::api::completion::complete(self, prompt).await
    }
}
