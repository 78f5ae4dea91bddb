//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! This module provides the main server setup function that creates the Axum router,
//! registers all routes, applies middleware, and starts the HTTP server.

// region: --- Imports
use crate::handlers;
use crate::middleware::{log_requests, map_res, stamp_req, RequestStamp};
use crate::services::{AblyTokenIssuer, CompletionModel, OpenAiClient, TokenIssuer};
use axum::{
    extract::FromRef,
    http::{header, HeaderValue, Method, Request, Response},
    routing::{get, post},
    Router,
};
use lib_core::{AppError, Config};
use lib_utils::get_env_or;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Span};
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub completion_model: Arc<dyn CompletionModel>,
}

impl AppState {
    /// Build the production services from configuration.
    pub fn from_config(config: &Config) -> lib_core::Result<Self> {
        Ok(Self {
            token_issuer: Arc::new(AblyTokenIssuer::new(config)?),
            completion_model: Arc::new(OpenAiClient::new(config)?),
        })
    }
}

impl FromRef<AppState> for Arc<dyn TokenIssuer> {
    fn from_ref(state: &AppState) -> Self {
        state.token_issuer.clone()
    }
}

impl FromRef<AppState> for Arc<dyn CompletionModel> {
    fn from_ref(state: &AppState) -> Self {
        state.completion_model.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3001")
    pub bind_address: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3001".to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `BIND_ADDRESS` and a comma separated `ALLOWED_ORIGINS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let allowed_origins = lib_utils::get_env_opt("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or(defaults.allowed_origins);

        Self {
            bind_address: get_env_or("BIND_ADDRESS", &defaults.bind_address),
            allowed_origins,
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Install the global tracing subscriber, level from `LOG_LEVEL`.
pub fn init_tracing() -> String {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => tracing_subscriber::EnvFilter::new(&log_level),
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .with_file(true)
        .finish();

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing::subscriber::set_global_default(subscriber);

    log_level
}

/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails
/// - The realtime API key is malformed
/// - The HTTP client cannot be built
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let log_level = init_tracing();

    info!(" CHAT RELAY BACKEND STARTING");
    info!(" Log level: {}", log_level);

    info!("Loading configuration...");
    let app_config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    app_config.validate().map_err(|e| anyhow::anyhow!(e))?;
    info!(
        model = %app_config.openai_model,
        base_url = %app_config.openai_base_url,
        timeout_secs = app_config.openai_timeout_secs,
        max_retries = app_config.openai_max_retries,
        client_id = %app_config.realtime_client_id,
        "Configuration loaded"
    );

    let state = AppState::from_config(&app_config).map_err(|e| anyhow::anyhow!(e))?;

    let app = create_router(state, config.allowed_origins.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(" SERVER READY: http://{}", config.bind_address);
    log_server_info();

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the main application router with all routes
pub fn create_router(state: AppState, allowed_origins: Vec<String>) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    info!("[ROUTE SETUP] Registering HTTP routes...");
    Router::new()
        .route("/api/route", get(handlers::issue_token))
        .route("/api", get(handlers::issue_token))
        .route("/api/openai/route", post(handlers::complete))
        .route("/api/openai", post(handlers::complete))
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            AppError::NotFound("Route not found".to_string())
        })
        .with_state(state)
        // Outermost first: the stamp must exist before the span and the logs.
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(stamp_req))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(|request: &Request<_>| {
                            let request_id = request
                                .extensions()
                                .get::<RequestStamp>()
                                .map(|s| s.id.clone())
                                .unwrap_or_else(|| "unknown".to_string());
                            tracing::info_span!(
                                "http_request",
                                request_id = %request_id,
                                method = %request.method(),
                                uri = %request.uri(),
                                version = ?request.version(),
                            )
                        })
                        .on_response(|_response: &Response<_>, _latency: Duration, _span: &Span| {
                            // logged by log_requests
                        })
                        .on_failure(|error: ServerErrorsFailureClass, latency: Duration, _span: &Span| {
                            tracing::error!(
                                error = ?error,
                                latency_ms = latency.as_millis() as u64,
                                "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                                error,
                                latency.as_millis()
                            );
                        }),
                )
                .layer(axum::middleware::from_fn(log_requests))
                .layer(axum::middleware::from_fn(map_res)),
        )
        .layer(cors)
}

/// Log server information
fn log_server_info() {
    info!(" REALTIME TOKENS:");
    info!("   • GET  /api/route");
    info!("   • GET  /api (alias)");
    info!(" COMPLETION PROXY:");
    info!("   • POST /api/openai/route  {{\"prompt\": \"...\"}}");
    info!("   • POST /api/openai (alias)");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address, "127.0.0.1:3001");
        assert!(!config.allowed_origins.is_empty());
    }

    #[test]
    fn test_app_state_from_default_config() {
        assert!(AppState::from_config(&Config::default()).is_ok());
    }
}
