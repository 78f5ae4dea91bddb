//! # Response Mapping Middleware
//!
//! Post-processes every response:
//!
//! - API responses (`/api/*`) get `Cache-Control: no-store` unless the handler set
//!   its own; token requests and completions must never be served from a cache
//! - Server errors are logged with the request id
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::Router;
//! use lib_web::middleware::mw_res_map::map_res;
//!
//! let app = Router::new()
//!     .route("/api/endpoint", get(handler))
//!     .layer(axum::middleware::from_fn(map_res));
//! ```

use crate::middleware::mw_req_stamp::RequestStamp;
use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::error;

const API_PREFIX: &str = "/api";

/// Response mapping middleware.
pub async fn map_res(req: Request, next: Next) -> Response {
    let is_api = is_api_path(req.uri().path());
    let request_id = req
        .extensions()
        .get::<RequestStamp>()
        .map(|s| s.id.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let mut res = next.run(req).await;

    if is_api && !res.headers().contains_key(header::CACHE_CONTROL) {
        res.headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }

    if res.status().is_server_error() {
        error!(request_id = %request_id, status = res.status().as_u16(), "[RESPONSE] Server error");
    }

    res
}

fn is_api_path(path: &str) -> bool {
    path == API_PREFIX || path.starts_with("/api/")
}
