//! Conversation domain entities

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Maximum length of a conversation title, in characters.
///
/// Titles are derived from the first message of a conversation and
/// truncated with an ellipsis beyond this length.
pub const TITLE_MAX_CHARS: usize = 50;

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// A single message exchanged in a conversation (Entity)
///
/// `sources` holds opaque references returned by the chat service alongside
/// an assistant reply. `is_error` marks the fixed apology text appended when
/// a request fails; such messages never carry sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub sender: Sender,
    pub text: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub is_error: bool,
    /// Creation time in unix milliseconds
    pub timestamp: i64,
}

impl MessageRecord {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            sources: Vec::new(),
            is_error: false,
            timestamp: now_millis(),
        }
    }

    pub fn assistant(text: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
            sources,
            is_error: false,
            timestamp: now_millis(),
        }
    }

    /// An error-flagged assistant message (apology text after a failed send)
    pub fn assistant_error(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
            sources: Vec::new(),
            is_error: true,
            timestamp: now_millis(),
        }
    }
}

/// A persisted, titled group of messages exchanged in one session (Entity)
///
/// Identity is the `id`; uniqueness comes from the generation scheme in
/// [`generate_conversation_id`](super::id::generate_conversation_id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: String,
    pub title: String,
    pub messages: Vec<MessageRecord>,
    /// Creation time in unix milliseconds
    pub timestamp: i64,
}

impl ConversationRecord {
    /// Build a record from the in-memory message list of a live session.
    ///
    /// Returns `None` for an empty list; a conversation only comes into
    /// existence once it has at least one message to title itself from.
    pub fn from_messages(id: impl Into<String>, messages: Vec<MessageRecord>) -> Option<Self> {
        let first = messages.first()?;
        Some(Self {
            id: id.into(),
            title: derive_title(&first.text),
            messages,
            timestamp: now_millis(),
        })
    }
}

/// Derive a conversation title from its first message text.
fn derive_title(text: &str) -> String {
    let mut chars = text.chars();
    let title: String = chars.by_ref().take(TITLE_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{title}...")
    } else {
        title
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
