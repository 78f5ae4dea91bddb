//! # Completion Service
//!
//! [`CompletionModel`] is the seam the completion route calls through.
//! [`OpenAiClient`] implements it against an OpenAI-compatible
//! `/chat/completions` endpoint with a per-attempt timeout and a [`RetryPolicy`].
//!
//! ## Failure classification
//!
//! | Outcome | Error |
//! |---|---|
//! | non-success status (after retries) | [`AppError::Provider`] with the body as JSON, or as a JSON string when it is not JSON |
//! | transport failure, timeout | [`AppError::Upstream`] |
//! | undecodable 2xx body, no choices | [`AppError::Upstream`] |

use crate::services::retry::{is_retryable_status, parse_retry_after, RetryPolicy};
use async_trait::async_trait;
use lib_core::{AppError, Config, Result};
use reqwest::{header::RETRY_AFTER, Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, warn};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Send `prompt` as a single user turn and return the model's reply text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatTurn<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatTurn<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenAiClient {
    http: Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
    retry: RetryPolicy,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.openai_timeout_secs))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
            endpoint: format!("{}/chat/completions", config.openai_base_url.trim_end_matches('/')),
            retry: RetryPolicy::new(config.openai_max_retries),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn send_once(&self, prompt: &str) -> reqwest::Result<Response> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: [ChatTurn {
                role: "user",
                content: prompt,
            }],
        };

        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        request.send().await
    }
}

#[async_trait]
impl CompletionModel for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let mut attempt = 0u32;

        loop {
            let response = match self.send_once(prompt).await {
                Ok(response) => response,
                Err(e) if (e.is_timeout() || e.is_connect()) && self.retry.allows_retry(attempt) => {
                    let delay = self.retry.delay_for(attempt, None);
                    warn!(attempt, delay_ms = delay.as_millis() as u64, error = %e, "Completion request failed, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    continue;
                }
                Err(e) => {
                    error!(attempt, error = %e, "Completion request failed");
                    return Err(AppError::Upstream(e.to_string()));
                }
            };

            let status = response.status();

            if status.is_success() {
                let reply: ChatCompletionResponse = response
                    .json()
                    .await
                    .map_err(|e| AppError::Upstream(format!("undecodable completion reply: {}", e)))?;

                debug!(model = %self.model, choices = reply.choices.len(), "Completion received");

                return reply
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|choice| choice.message.content)
                    .ok_or_else(|| AppError::Upstream("completion reply had no content".to_string()));
            }

            if is_retryable_status(status.as_u16()) && self.retry.allows_retry(attempt) {
                let retry_after = response
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(parse_retry_after);
                let delay = self.retry.delay_for(attempt, retry_after);
                warn!(
                    attempt,
                    status = status.as_u16(),
                    delay_ms = delay.as_millis() as u64,
                    "Completion provider returned a transient error, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            let text = response.text().await.unwrap_or_default();
            let data = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));

            error!(status = status.as_u16(), body = %data, "Completion provider returned an error");
            return Err(AppError::Provider {
                status: status.as_u16(),
                data,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{bearer_token, body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, retries: u32) -> OpenAiClient {
        let config = Config {
            openai_api_key: Some("sk-test".to_string()),
            openai_base_url: server.uri(),
            ..Config::default()
        };
        OpenAiClient::new(&config).unwrap().with_retry_policy(RetryPolicy {
            max_retries: retries,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
        })
    }

    fn reply(content: &str) -> Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }]
        })
    }

    #[tokio::test]
    async fn test_sends_single_user_turn() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(bearer_token("sk-test"))
            .and(body_json(json!({
                "model": "gpt-3.5-turbo",
                "messages": [{ "role": "user", "content": "2+2" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("4")))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server, 0).complete("2+2").await.unwrap();
        assert_eq!(result, "4");
    }

    #[tokio::test]
    async fn test_retries_503_then_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("back again")))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server, 2).complete("hello").await.unwrap();
        assert_eq!(result, "back again");
    }

    #[tokio::test]
    async fn test_rate_limit_after_retries_is_structured() {
        let server = MockServer::start().await;
        let body = json!({ "error": { "message": "Rate limit reached", "type": "requests", "code": "rate_limit_exceeded" } });
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(body.clone()))
            .expect(3)
            .mount(&server)
            .await;

        let err = client_for(&server, 2).complete("hello").await.unwrap_err();
        match err {
            AppError::Provider { status, data } => {
                assert_eq!(status, 429);
                assert_eq!(data, body);
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body_becomes_string() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = client_for(&server, 0).complete("hello").await.unwrap_err();
        match err {
            AppError::Provider { status, data } => {
                assert_eq!(status, 502);
                assert_eq!(data, Value::String("Bad Gateway".to_string()));
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": { "message": "Incorrect API key" } })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server, 2).complete("hello").await.unwrap_err();
        assert!(matches!(err, AppError::Provider { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_empty_choices_is_unstructured() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let err = client_for(&server, 0).complete("hello").await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_unstructured() {
        let config = Config {
            openai_base_url: "http://127.0.0.1:9".to_string(),
            ..Config::default()
        };
        let client = OpenAiClient::new(&config).unwrap().with_retry_policy(RetryPolicy::none());

        let err = client.complete("hello").await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }
}
