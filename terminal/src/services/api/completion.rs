//! # Completion Endpoint
//!
//! Calls the backend completion proxy.

use super::client::ApiClient;
use crate::core::error::{AppError, Result};
use shared::{preview, CompletionRequest, CompletionResponse};

/// `POST /api/openai/route`
#[tracing::instrument(skip(client, prompt), fields(prompt = %preview(prompt, 40)))]
pub async fn complete(client: &ApiClient, prompt: &str) -> Result<String> {
    let start = std::time::Instant::now();

    let response = client
        .client
        .post(client.url("/api/openai/route"))
        .json(&CompletionRequest {
            prompt: prompt.to_string(),
        })
        .send()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Completion network error");
            AppError::Api(format!("Network error: {}", e))
        })?;

    if !response.status().is_success() {
        let err = ApiClient::error_from(response).await;
        tracing::warn!(error = %err, duration_ms = start.elapsed().as_millis() as u64, "Completion failed");
        return Err(err);
    }

    let reply = response.json::<CompletionResponse>().await.map_err(|e| {
        tracing::error!(error = %e, "Completion response parse error");
        AppError::Api(format!("Failed to parse completion: {}", e))
    })?;

    tracing::info!(duration_ms = start.elapsed().as_millis() as u64, "Completion received");
    Ok(reply.result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::service::CompletionApi;
    use crate::services::api::fetch_token_request;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_complete_returns_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/openai/route"))
            .and(body_json(json!({ "prompt": "Hey OpenAI, 2+2?" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "4" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let result = client.complete("Hey OpenAI, 2+2?").await.unwrap();

        assert_eq!(result, "4");
    }

    #[tokio::test]
    async fn test_complete_surfaces_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/openai/route"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({ "error": "An error occurred during your request." })),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let err = client.complete("Hey OpenAI").await.unwrap_err();

        assert_eq!(err.to_string(), "API error: An error occurred during your request. (500)");
    }

    #[tokio::test]
    async fn test_fetch_token_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/route"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "keyName": "appId.keyId",
                "clientId": "grou",
                "timestamp": 1_700_000_000_000_i64,
                "nonce": "abcdefghijklmnop",
                "mac": "c2lnbmF0dXJl"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(format!("{}/", server.uri())).unwrap();
        let token_request = fetch_token_request(&client).await.unwrap();

        assert_eq!(token_request.key_name, "appId.keyId");
        assert_eq!(token_request.client_id.as_deref(), Some("grou"));
    }
}
