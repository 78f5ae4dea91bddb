//! # Chat Rules
//!
//! The pieces of chat behavior that do not touch the UI or the network: when a
//! message asks for a completion, who authored a message, and what the bot reply
//! looks like.

use rand::{distr::Alphanumeric, Rng};
use shared::ChatMessage;

/// A sent message starting with this phrase (case-sensitive) asks for a completion.
pub const TRIGGER_PHRASE: &str = "Hey OpenAI";

/// Bot replies carry ids starting with this prefix.
pub const BOT_ID_PREFIX: &str = "openai-";

/// Prepended to the completion text when the reply is published.
pub const BOT_REPLY_PREFIX: &str = "OpenAI: ";

const BOT_ID_SUFFIX_LEN: usize = 8;

pub fn is_trigger(text: &str) -> bool {
    text.starts_with(TRIGGER_PHRASE)
}

/// Who a rendered message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    Me,
    Other,
}

impl Author {
    pub fn as_str(&self) -> &'static str {
        match self {
            Author::Me => "me",
            Author::Other => "other",
        }
    }
}

/// Bot replies are never "me", even though this client published them.
pub fn classify(message: &ChatMessage, my_connection_id: Option<&str>) -> Author {
    let is_bot = message
        .id
        .as_deref()
        .is_some_and(|id| id.starts_with(BOT_ID_PREFIX));
    if is_bot {
        return Author::Other;
    }

    match (message.connection_id.as_deref(), my_connection_id) {
        (Some(theirs), Some(mine)) if theirs == mine => Author::Me,
        _ => Author::Other,
    }
}

pub fn bot_message_id() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(BOT_ID_SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{}{}", BOT_ID_PREFIX, suffix)
}

/// The message published when a completion comes back.
pub fn bot_reply(result: &str) -> ChatMessage {
    ChatMessage::with_id(format!("{}{}", BOT_REPLY_PREFIX, result), bot_message_id())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_connection(data: &str, connection_id: &str, id: Option<&str>) -> ChatMessage {
        ChatMessage {
            id: id.map(str::to_string),
            connection_id: Some(connection_id.to_string()),
            ..ChatMessage::new(data)
        }
    }

    #[test]
    fn test_trigger_is_case_sensitive_prefix() {
        assert!(is_trigger("Hey OpenAI, hi"));
        assert!(is_trigger("Hey OpenAI"));
        assert!(!is_trigger("so... Hey OpenAI"));
        assert!(!is_trigger("hey openai"));
        assert!(!is_trigger("Hey Open AI"));
    }

    #[test]
    fn test_own_message_is_me() {
        let message = from_connection("hi", "conn-1", Some("abc:0"));
        assert_eq!(classify(&message, Some("conn-1")), Author::Me);
        assert_eq!(classify(&message, Some("conn-2")), Author::Other);
    }

    #[test]
    fn test_bot_reply_is_never_me() {
        let message = from_connection("OpenAI: 4", "conn-1", Some("openai-a1B2c3D4"));
        assert_eq!(classify(&message, Some("conn-1")), Author::Other);
    }

    #[test]
    fn test_bot_prefix_needs_the_dash() {
        let message = from_connection("hi", "conn-1", Some("openaifan:0"));
        assert_eq!(classify(&message, Some("conn-1")), Author::Me);
    }

    #[test]
    fn test_unknown_connection_is_other() {
        let message = ChatMessage::new("hi");
        assert_eq!(classify(&message, None), Author::Other);
        assert_eq!(classify(&message, Some("conn-1")), Author::Other);
    }

    #[test]
    fn test_bot_reply_shape() {
        let reply = bot_reply("2+2 equals 4.");

        assert_eq!(reply.data, "OpenAI: 2+2 equals 4.");
        let id = reply.id.unwrap();
        assert!(id.starts_with(BOT_ID_PREFIX));
        assert_eq!(id.len(), BOT_ID_PREFIX.len() + BOT_ID_SUFFIX_LEN);
        assert!(id[BOT_ID_PREFIX.len()..].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_author_labels() {
        assert_eq!(Author::Me.as_str(), "me");
        assert_eq!(Author::Other.as_str(), "other");
    }
}
