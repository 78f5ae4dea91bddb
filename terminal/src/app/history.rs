//! Bounded chat history.

use shared::ChatMessage;
use std::collections::VecDeque;

/// Most messages kept on screen; older ones fall off the front.
pub const MAX_HISTORY: usize = 200;

#[derive(Debug, Clone, Default)]
pub struct MessageHistory {
    messages: VecDeque<ChatMessage>,
}

impl MessageHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append in arrival order, dropping the oldest beyond [`MAX_HISTORY`].
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push_back(message);
        while self.messages.len() > MAX_HISTORY {
            self.messages.pop_front();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.back()
    }
}
