//! # Application Orchestrator
//!
//! [`App`] ties the chat screen to the background tasks:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 Main Thread (egui)                   │
//! │  App                                                 │
//! │  - on_tick()      drains AppEvents every frame       │
//! │  - submit()       publish draft, then trigger check  │
//! │  State: Arc<RwLock<AppState>>                        │
//! └──────────────────────────┬───────────────────────────┘
//!                            │ async_channel (unbounded)
//! ┌──────────────────────────▼───────────────────────────┐
//! │                 Tokio tasks                          │
//! │  - tasks::realtime::connect()    session + events    │
//! │  - tasks::completion::request_completion()           │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Inbound messages are only ever appended from [`App::on_tick`], so history
//! updates are serialized on the UI thread.

pub mod chat;
mod event_handler;
mod events;
pub mod history;
mod state;
mod tasks;

pub use chat::{classify, Author};
pub use events::AppEvent;
pub use history::{MessageHistory, MAX_HISTORY};
pub use state::{AppState, ConnectionStatus};

use crate::config::ClientConfig;
use crate::core::error::Result;
use crate::core::service::CompletionApi;
use crate::services::ApiClient;
use async_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
use shared::{preview, ChatMessage};
use std::sync::Arc;
use tokio::task::JoinHandle;

pub struct App {
    /// Shared state; hold locks only for the duration of a read or a small update.
    pub state: Arc<RwLock<AppState>>,
    /// Polled with `try_recv()` in [`App::on_tick`].
    pub event_rx: Receiver<AppEvent>,
    event_tx: Sender<AppEvent>,
    api: Arc<dyn CompletionApi>,
}

impl App {
    /// Create the app and start connecting to the chat channel.
    ///
    /// Must be called inside a Tokio runtime context.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api_client = ApiClient::new(&config.api_base_url)?;
        let app = Self::with_services(Arc::new(api_client.clone()));

        tasks::realtime::connect(api_client, config, app.event_tx.clone());
        tracing::info!("App state initialized - connecting to chat");

        Ok(app)
    }

    /// App wired to the given completion service, not connected to any channel.
    pub fn with_services(api: Arc<dyn CompletionApi>) -> Self {
        let (event_tx, event_rx) = unbounded();
        Self {
            state: Arc::new(RwLock::new(AppState::new())),
            event_rx,
            event_tx,
            api,
        }
    }

    /// Sender for feeding events in from outside the app's own tasks.
    pub fn event_sender(&self) -> Sender<AppEvent> {
        self.event_tx.clone()
    }

    /// Process every pending event. Call once per frame.
    pub fn on_tick(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
    }

    /// Send the current draft.
    ///
    /// Blank drafts are ignored. Otherwise the draft is published, cleared, the
    /// input is refocused and the trigger check runs on the sent text. Returns the
    /// completion task when the trigger matched.
    pub fn submit(&self) -> Option<JoinHandle<()>> {
        let text = {
            let mut state = self.state.write();
            if state.draft.trim().is_empty() {
                return None;
            }
            state.focus_input = true;
            state.scroll_to_bottom = true;
            std::mem::take(&mut state.draft)
        };

        self.send_chat_message(text)
    }

    /// Publish `text` as a chat message, then run the trigger check on it.
    pub fn send_chat_message(&self, text: String) -> Option<JoinHandle<()>> {
        let publisher = self.state.read().publisher.clone();

        match &publisher {
            Some(publisher) => {
                if let Err(e) = publisher.publish(ChatMessage::new(text.clone())) {
                    tracing::error!(error = %e, "Failed to publish chat message");
                }
            }
            None => tracing::warn!(text = %preview(&text, 40), "Not connected; message not published"),
        }

        self.send_openai_message(text)
    }

    /// Ask for a completion when `text` starts with the trigger phrase; the reply
    /// is republished to the channel.
    pub fn send_openai_message(&self, text: String) -> Option<JoinHandle<()>> {
        if !chat::is_trigger(&text) {
            return None;
        }

        tracing::debug!(prompt = %preview(&text, 40), "Trigger phrase detected");
        let publisher = self.state.read().publisher.clone();
        Some(tasks::completion::request_completion(self.api.clone(), publisher, text))
    }
}
