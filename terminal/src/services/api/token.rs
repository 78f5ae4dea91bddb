//! # Token Endpoint
//!
//! Fetches a signed realtime token request from the backend.

use super::client::ApiClient;
use crate::core::error::{AppError, Result};
use shared::TokenRequest;

/// `GET /api/route`
#[tracing::instrument(skip(client))]
pub async fn fetch_token_request(client: &ApiClient) -> Result<TokenRequest> {
    let response = client
        .client
        .get(client.url("/api/route"))
        .send()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Token request network error");
            AppError::Api(format!("Network error: {}", e))
        })?;

    if !response.status().is_success() {
        let err = ApiClient::error_from(response).await;
        tracing::warn!(error = %err, "Token request rejected");
        return Err(err);
    }

    let token_request = response.json::<TokenRequest>().await.map_err(|e| {
        tracing::error!(error = %e, "Token request parse error");
        AppError::Api(format!("Failed to parse token request: {}", e))
    })?;

    tracing::debug!(key_name = %token_request.key_name, client_id = ?token_request.client_id, "Token request received");
    Ok(token_request)
}
