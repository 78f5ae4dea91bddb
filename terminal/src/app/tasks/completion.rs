//! # Completion Tasks
//!
//! Asks the backend for a completion and republishes the answer to the channel.

use crate::app::chat::bot_reply;
use crate::core::service::{ChatPublisher, CompletionApi};
use shared::preview;
use std::sync::Arc;
use tokio::spawn;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// The reply is only published; it reaches the history through the receive path
/// like any other message. Failures are logged and otherwise dropped.
pub(crate) fn request_completion(
    api: Arc<dyn CompletionApi>,
    publisher: Option<Arc<dyn ChatPublisher>>,
    prompt: String,
) -> JoinHandle<()> {
    spawn(async move {
        let result = match api.complete(&prompt).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, prompt = %preview(&prompt, 40), "Error fetching completion");
                return;
            }
        };

        let reply = bot_reply(&result);
        info!(id = ?reply.id, reply = %preview(&reply.data, 60), "Publishing completion reply");

        match publisher {
            Some(publisher) => {
                if let Err(e) = publisher.publish(reply) {
                    error!(error = %e, "Failed to publish completion reply");
                }
            }
            None => warn!("Completion arrived but chat is not connected; reply dropped"),
        }
    })
}
