//! # Request Stamping Middleware
//!
//! Adds a request ID to requests for tracing and debugging.
//!
//! Generates a uuid v4 request ID, stores it in request extensions (where the trace
//! span, the logging middleware and the response mapper pick it up) and echoes it
//! back as `X-Request-ID`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::Router;
//! use lib_web::middleware::mw_req_stamp::stamp_req;
//!
//! let app = Router::new()
//!     .route("/api/route", get(issue_token))
//!     .layer(axum::middleware::from_fn(stamp_req));
//! ```
//!
//! Request ID is available in handlers via `Extension<RequestStamp>`:
//!
//! ```rust,ignore
//! use axum::extract::Extension;
//! use lib_web::middleware::mw_req_stamp::RequestStamp;
//!
//! async fn handler(Extension(stamp): Extension<RequestStamp>) -> String {
//!     format!("Request ID: {}", stamp.id)
//! }
//! ```

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Request metadata for tracing and debugging.
#[derive(Clone, Debug)]
pub struct RequestStamp {
    /// Unique request identifier
    pub id: String,
}

impl RequestStamp {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
        }
    }
}

/// Request stamping middleware.
///
/// Generates a unique request ID and adds it to:
/// - Request extensions (for handler access)
/// - Response headers (`X-Request-ID`)
///
/// # Example
///
/// ```rust,ignore
/// use axum::Router;
/// use lib_web::middleware::mw_req_stamp::stamp_req;
///
/// let app = Router::new()
///     .layer(axum::middleware::from_fn(stamp_req));
/// ```
pub async fn stamp_req(mut req: Request, next: Next) -> Response {
    let stamp = RequestStamp::new();
    req.extensions_mut().insert(stamp.clone());

    let mut res = next.run(req).await;

    if let Ok(header_value) = HeaderValue::from_str(&stamp.id) {
        res.headers_mut().insert("X-Request-ID", header_value);
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request as HttpRequest, routing::get, Extension, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_stamp_is_visible_to_handler_and_response() {
        let app = Router::new()
            .route("/", get(|Extension(stamp): Extension<RequestStamp>| async move { stamp.id }))
            .layer(axum::middleware::from_fn(stamp_req));

        let response = app
            .oneshot(HttpRequest::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let header = response.headers()["X-Request-ID"].to_str().unwrap().to_string();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();

        assert_eq!(header.len(), 36);
        assert_eq!(String::from_utf8(body.to_vec()).unwrap(), header);
    }
}
