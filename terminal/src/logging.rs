//! File-based logging initialization
//!
//! The window owns stdout/stderr, so logs go to a daily-rotated file instead:
//! `logs/chat-terminal.log` (directory overridable with `TERMINAL_LOG_DIR`).
//! The filter comes from `RUST_LOG`, then `TERMINAL_LOG_LEVEL`.

use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_NAME: &str = "chat-terminal.log";
const DEFAULT_FILTER: &str = "terminal=info,lib_realtime=info,warn";

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self {
            log_dir: std::env::var("TERMINAL_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("logs")),
            log_level: std::env::var("TERMINAL_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_FILTER.to_string()),
        }
    }
}

/// Install the global subscriber. Safe to skip: without it the app runs silently.
pub fn init() {
    let config = LogConfig::from_env();

    if let Err(e) = fs::create_dir_all(&config.log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
        return;
    }

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: a tracing subscriber is already installed");
        return;
    }

    tracing::info!(
        log_dir = %config.log_dir.display(),
        log_level = %config.log_level,
        "Logging initialized"
    );

    setup_panic_hook();

    // The writer thread must outlive main.
    std::mem::forget(guard);
}

fn setup_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic message".to_string()
        };

        tracing::error!(location = %location, message = %message, "Application panic");
        default_panic(panic_info);
    }));
}
