//! Domain error types

use thiserror::Error;

/// Default maximum length of an outgoing chat message, in characters.
///
/// Matches the limit enforced by the chat service, so oversized input is
/// rejected before a request is ever issued.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Domain-level errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Message too long. Maximum {limit} characters")]
    MessageTooLong { limit: usize },

    #[error("Unknown conversation: {0}")]
    UnknownConversation(String),
}

/// Validate a message the user wants to send.
///
/// Whitespace-only input counts as empty. `max_chars` is counted in
/// characters, not bytes, so multibyte text is not penalized.
pub fn validate_outgoing_message(text: &str, max_chars: usize) -> Result<(), DomainError> {
    if text.trim().is_empty() {
        return Err(DomainError::EmptyMessage);
    }
    if text.chars().count() > max_chars {
        return Err(DomainError::MessageTooLong { limit: max_chars });
    }
    Ok(())
}
