//! # Token Issuer Handler
//!
//! `GET /api/route` (alias `GET /api`): returns a freshly signed realtime token
//! request for the configured client id. Never cached.

use crate::services::TokenIssuer;
use axum::{extract::State, http::header, response::IntoResponse, Json};
use lib_core::Result;
use std::sync::Arc;

/// Issue a realtime token request.
///
/// The body is the token request exactly as the issuer produced it; clients pass it
/// on to the provider unchanged.
pub async fn issue_token(
    State(issuer): State<Arc<dyn TokenIssuer>>,
) -> Result<impl IntoResponse> {
    let token_request = issuer.create_token_request().await?;

    Ok(([(header::CACHE_CONTROL, "no-store")], Json(token_request)))
}
