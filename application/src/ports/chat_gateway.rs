//! Chat gateway port
//!
//! Defines the single request/response interface to the remote chat
//! endpoint. One request per user message, no retry; failures become an
//! error-flagged message in the conversation.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when sending a chat message
#[derive(Error, Debug)]
pub enum ChatError {
    /// Non-success status with a server-provided error message.
    #[error("{0}")]
    Rejected(String),

    /// The service could not be reached or answered garbage.
    #[error("Connection error: {0}")]
    Transport(String),
}

/// An assistant reply with its supporting source references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub response: String,
    pub sources: Vec<String>,
}

/// Gateway to the remote chat endpoint
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Send one user message within a conversation and await the reply.
    async fn send(
        &self,
        message: &str,
        conversation_id: &str,
        language: Option<&str>,
    ) -> Result<ChatReply, ChatError>;
}
