//! Domain layer for arnica
//!
//! This crate contains the core entities and pure logic of the chat client:
//! conversation records, the bounded conversation history, identity and
//! storage scoping. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Conversation history
//!
//! Conversations are kept as a bounded, most-recent-first list. The list that
//! is "live" on screen is always stored under one unscoped key (the *active
//! scope*); each signed-in user additionally owns a snapshot under an
//! identity-qualified key. Switching identity moves data between the two.
//!
//! ## Identity
//!
//! The client is either a `Guest` or a signed-in `User`. Identity decides
//! which snapshot the active scope is reconciled with on login/logout.

pub mod conversation;
pub mod core;
pub mod identity;
pub mod preferences;

// Re-export commonly used types
pub use conversation::{
    entities::{ConversationRecord, MessageRecord, Sender, TITLE_MAX_CHARS},
    history::{ConversationHistory, HISTORY_CAP},
    id::generate_conversation_id,
};
pub use core::error::{DomainError, MAX_MESSAGE_CHARS, validate_outgoing_message};
pub use identity::{
    entities::{Identity, UserAccount},
    scope::StorageScope,
};
pub use preferences::Theme;
