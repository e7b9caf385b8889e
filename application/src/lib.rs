//! Application layer for arnica
//!
//! This crate contains use cases and port definitions. It depends only on
//! the domain layer; adapters for the ports live in the infrastructure
//! layer and are injected by the binary.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    auth_gateway::{AuthError, AuthGateway, LoginGrant},
    chat_gateway::{ChatError, ChatGateway, ChatReply},
    conversation_store::{ConversationStore, InMemoryConversationStore, StoreError},
    preference_store::{InMemoryPreferenceStore, PreferenceStore},
};
pub use use_cases::chat_session::{
    ChatSessionUseCase, ERROR_REPLY_TEXT, SendOutcome, SessionState,
};
pub use use_cases::manage_session::{MIN_PASSWORD_CHARS, SessionError, SessionManagerUseCase};
