//! Infrastructure layer for arnica
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: file-backed storage, HTTP gateways to the chat
//! service, and configuration file loading.

pub mod config;
pub mod http;
pub mod storage;

// Re-export commonly used types
pub use config::{ConfigLoader, FileChatConfig, FileConfig, FileServerConfig, FileStorageConfig};
pub use http::{auth::HttpAuthGateway, chat::HttpChatGateway};
pub use storage::{
    conversations::FileConversationStore, kv::FileKvStore, preferences::FilePreferenceStore,
};
