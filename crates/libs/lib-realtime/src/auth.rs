//! # Token Request Signing
//!
//! Builds the signed token requests the backend hands to chat clients, so the
//! provider's master key never leaves the server.
//!
//! The MAC is HMAC-SHA256 over the newline-terminated fields
//!
//! ```text
//! keyName \n ttl \n capability \n clientId \n timestamp \n nonce \n
//! ```
//!
//! keyed with the key secret and base64 encoded. Absent optional fields sign as
//! empty strings.

use crate::error::{RealtimeError, Result};
use hmac::{Hmac, Mac};
use lib_utils::{b64_decode, b64_encode, now_millis};
use rand::{distr::Alphanumeric, Rng};
use sha2::Sha256;
use shared::TokenRequest;
use std::fmt;
use std::str::FromStr;

type HmacSha256 = Hmac<Sha256>;

const NONCE_LEN: usize = 16;

/// Provider API key split into its public name and its secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    name: String,
    secret: String,
}

impl ApiKey {
    /// Parse a `keyName:keySecret` string.
    pub fn parse(raw: &str) -> Result<Self> {
        let (name, secret) = raw
            .trim()
            .split_once(':')
            .ok_or_else(|| RealtimeError::InvalidKey("expected keyName:keySecret".to_string()))?;

        if name.is_empty() || secret.is_empty() {
            return Err(RealtimeError::InvalidKey(
                "key name and secret must both be non-empty".to_string(),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            secret: secret.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for ApiKey {
    type Err = RealtimeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// Never print the secret.
impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("name", &self.name)
            .field("secret", &"***REDACTED***")
            .finish()
    }
}

/// Optional token parameters. The chat demo only ever sets `client_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenParams {
    pub client_id: Option<String>,
    /// Token lifetime in milliseconds; provider default when `None`
    pub ttl: Option<u64>,
    /// JSON capability string; key capability when `None`
    pub capability: Option<String>,
}

impl TokenParams {
    pub fn for_client(client_id: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            ..Self::default()
        }
    }
}

/// Create a token request stamped with the current time and a fresh nonce.
pub fn create_token_request(key: &ApiKey, params: &TokenParams) -> Result<TokenRequest> {
    sign_token_request(key, params, now_millis(), random_nonce())
}

/// Create a token request with an explicit timestamp and nonce.
pub fn sign_token_request(
    key: &ApiKey,
    params: &TokenParams,
    timestamp: i64,
    nonce: String,
) -> Result<TokenRequest> {
    let mut request = TokenRequest {
        key_name: key.name.clone(),
        ttl: params.ttl,
        capability: params.capability.clone(),
        client_id: params.client_id.clone(),
        timestamp,
        nonce,
        mac: String::new(),
    };

    let mac = keyed_mac(&key.secret, &request)?;
    request.mac = b64_encode(mac.finalize().into_bytes());

    Ok(request)
}

/// Check a token request's MAC against `key`.
///
/// Returns `false` for a request issued under another key name, a malformed MAC or
/// any tampered field.
pub fn verify_token_request(key: &ApiKey, request: &TokenRequest) -> bool {
    if request.key_name != key.name {
        return false;
    }

    let Ok(expected) = b64_decode(&request.mac) else {
        return false;
    };

    keyed_mac(&key.secret, request)
        .map(|mac| mac.verify_slice(&expected).is_ok())
        .unwrap_or(false)
}

fn keyed_mac(secret: &str, request: &TokenRequest) -> Result<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| RealtimeError::InvalidKey(e.to_string()))?;
    mac.update(signing_text(request).as_bytes());
    Ok(mac)
}

fn signing_text(request: &TokenRequest) -> String {
    format!(
        "{}\n{}\n{}\n{}\n{}\n{}\n",
        request.key_name,
        request.ttl.map(|ttl| ttl.to_string()).unwrap_or_default(),
        request.capability.as_deref().unwrap_or_default(),
        request.client_id.as_deref().unwrap_or_default(),
        request.timestamp,
        request.nonce,
    )
}

fn random_nonce() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}
