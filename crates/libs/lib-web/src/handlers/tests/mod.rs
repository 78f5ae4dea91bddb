//! # Handler Tests
//!
//! Router-level tests for the token and completion endpoints, run against stub
//! services through the full middleware stack.


use crate::server::{create_router, AppState};
use crate::services::{CompletionModel, TokenIssuer};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::Response;
use axum::Router;
use lib_core::{AppError, Result};
use serde_json::Value;
use shared::TokenRequest;
use std::sync::{Arc, Mutex};

/// Token issuer returning a fixed request, or a config error when `None`.
pub struct StubIssuer(pub Option<TokenRequest>);

#[async_trait]
impl TokenIssuer for StubIssuer {
    async fn create_token_request(&self) -> Result<TokenRequest> {
        self.0
            .clone()
            .ok_or_else(|| AppError::Config("ABLY_API_KEY is not set".to_string()))
    }
}

pub enum StubReply {
    Text(String),
    Provider { status: u16, data: Value },
    Unstructured,
}

/// Completion model with a canned reply that records every prompt it sees.
pub struct StubModel {
    reply: StubReply,
    pub prompts: Mutex<Vec<String>>,
}

impl StubModel {
    pub fn new(reply: StubReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl CompletionModel for StubModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            StubReply::Text(text) => Ok(text.clone()),
            StubReply::Provider { status, data } => Err(AppError::Provider {
                status: *status,
                data: data.clone(),
            }),
            StubReply::Unstructured => Err(AppError::Upstream("connection reset".to_string())),
        }
    }
}

pub fn sample_token_request() -> TokenRequest {
    TokenRequest {
        key_name: "appId.keyId".to_string(),
        ttl: None,
        capability: None,
        client_id: Some("grou".to_string()),
        timestamp: 1_700_000_000_000,
        nonce: "abcdefghijklmnop".to_string(),
        mac: "c2lnbmF0dXJl".to_string(),
    }
}

/// Create test app with the production router and middleware.
pub fn test_app(issuer: Arc<dyn TokenIssuer>, model: Arc<dyn CompletionModel>) -> Router {
    let state = AppState {
        token_issuer: issuer,
        completion_model: model,
    };
    create_router(state, Vec::new())
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
