//! # Shared Utility Functions
//!
//! Common helpers used by the backend and the chat terminal.
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::preview;
//!
//! assert_eq!(preview("Hey OpenAI, tell me a story", 10), "Hey OpenAI...");
//! assert_eq!(preview("short", 10), "short");
//! ```

/// Shorten `text` to at most `max_chars` characters for log output, appending `...`
/// when anything was cut.
///
/// Counts characters rather than bytes so multi-byte text never splits mid-codepoint.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_keeps_short_text() {
        assert_eq!(preview("hello", 5), "hello");
        assert_eq!(preview("", 3), "");
    }

    #[test]
    fn test_preview_cuts_on_char_boundary() {
        assert_eq!(preview("héllo wörld", 4), "héll...");
    }
}
