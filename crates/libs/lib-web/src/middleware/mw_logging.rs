//! # Request/Response Logging Middleware
//!
//! Structured logging for HTTP requests and responses, correlated by request ID.
//!
//! This middleware logs:
//! - Request method, path, query params
//! - Request headers at debug level (sensitive ones redacted)
//! - Response status and duration
//!
//! Request bodies are never logged. Prompts can carry anything a user typed, and the
//! completion handler logs its own truncated preview at debug level.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::Router;
//! use lib_web::middleware::mw_logging::log_requests;
//!
//! let app = Router::new()
//!     .route("/api/route", get(issue_token))
//!     .layer(axum::middleware::from_fn(log_requests));
//! ```

use crate::middleware::mw_req_stamp::RequestStamp;
use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Sensitive headers that should not be logged
const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "cookie",
    "x-api-key",
    "x-auth-token",
    "authentication",
];

/// Request/response logging middleware
pub async fn log_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(|q| q.to_string());

    let request_id = req
        .extensions()
        .get::<RequestStamp>()
        .map(|s| s.id.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        query = ?query,
        user_agent = ?user_agent,
        "[REQUEST] {} {}",
        method,
        path,
    );

    debug!(
        request_id = %request_id,
        headers = ?sanitized_headers(req.headers()),
        "[REQUEST HEADERS]"
    );

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        error!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            duration_ms = duration.as_millis() as u64,
            "[RESPONSE] {} {} -> {} ({}ms) [SERVER ERROR]",
            method,
            path,
            status,
            duration.as_millis()
        );
    } else if response.status().is_client_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            duration_ms = duration.as_millis() as u64,
            "[RESPONSE] {} {} -> {} ({}ms) [CLIENT ERROR]",
            method,
            path,
            status,
            duration.as_millis()
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            duration_ms = duration.as_millis() as u64,
            "[RESPONSE] {} {} -> {} ({}ms)",
            method,
            path,
            status,
            duration.as_millis()
        );
    }

    response
}

fn sanitized_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            let name_lower = name.as_str().to_lowercase();
            if SENSITIVE_HEADERS.iter().any(|h| name_lower.contains(h)) {
                Some((name.to_string(), "***REDACTED***".to_string()))
            } else {
                value.to_str().ok().map(|v| (name.to_string(), v.to_string()))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_sensitive_headers_are_redacted() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer sk-live"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let sanitized = sanitized_headers(&headers);

        assert!(sanitized.contains(&("authorization".to_string(), "***REDACTED***".to_string())));
        assert!(sanitized.contains(&("content-type".to_string(), "application/json".to_string())));
    }
}
