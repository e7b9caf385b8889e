//! Chat session use case.
//!
//! Owns the active conversation's in-memory message list and drives
//! send/receive against the chat gateway. Persistence is delegated to the
//! [`ConversationStore`] port; the active conversation is only written out
//! on transition events (new chat, logout), never per message.
//!
//! The controller is a state machine over
//! [`SessionState`] with exactly one user action in flight: a `send` while
//! not idle is rejected, not queued. There is no cancellation; instead, a
//! reply is applied only if the conversation it originated from is still
//! the active one; late replies for an abandoned conversation are dropped.

use crate::ports::chat_gateway::{ChatError, ChatGateway, ChatReply};
use crate::ports::conversation_store::{ConversationStore, StoreError};
use arnica_domain::{
    ConversationHistory, ConversationRecord, DomainError, MAX_MESSAGE_CHARS, MessageRecord,
    StorageScope, generate_conversation_id, validate_outgoing_message,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Fixed apology text appended when a send fails.
pub const ERROR_REPLY_TEXT: &str = "Sorry, I encountered an error. Please try again.";

/// Controller states. One user action is in flight at a time; `state` is the
/// sole mutual-exclusion mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Sending,
    AwaitingResponse,
    Error,
}

/// What a call to [`ChatSessionUseCase::send`] did.
#[derive(Debug, PartialEq)]
pub enum SendOutcome {
    /// The assistant replied; a message with its sources was appended.
    Replied,
    /// The request failed; an error-flagged apology was appended.
    Failed,
    /// Input rejected before any request was issued.
    Rejected(DomainError),
    /// Another send was already in flight.
    Busy,
    /// The reply arrived for a conversation that is no longer active and
    /// was dropped.
    Stale,
}

/// Use case driving the active conversation.
pub struct ChatSessionUseCase {
    gateway: Arc<dyn ChatGateway>,
    store: Arc<dyn ConversationStore>,
    state: SessionState,
    conversation_id: String,
    messages: Vec<MessageRecord>,
    language: Option<String>,
    max_message_chars: usize,
}

impl ChatSessionUseCase {
    pub fn new(gateway: Arc<dyn ChatGateway>, store: Arc<dyn ConversationStore>) -> Self {
        Self {
            gateway,
            store,
            state: SessionState::Idle,
            conversation_id: generate_conversation_id(),
            messages: Vec::new(),
            language: None,
            max_message_chars: MAX_MESSAGE_CHARS,
        }
    }

    /// Set the reply language forwarded with every request.
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    /// Change the reply language for subsequent requests.
    pub fn set_language(&mut self, language: Option<String>) {
        self.language = language;
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Override the outgoing message length limit.
    pub fn with_max_message_chars(mut self, max_chars: usize) -> Self {
        self.max_message_chars = max_chars;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    /// Messages of the active conversation, oldest first.
    pub fn messages(&self) -> &[MessageRecord] {
        &self.messages
    }

    /// The persisted history of the active scope, most recent first.
    pub fn history(&self) -> ConversationHistory {
        self.store.load(&StorageScope::Active)
    }

    /// Send one user message and wait for the reply.
    ///
    /// Empty or oversized input and a controller that is not idle are
    /// no-ops: nothing is appended, no request is issued. The user message
    /// is appended optimistically before the request; on failure the
    /// conversation gets the fixed apology text instead of a reply.
    pub async fn send(&mut self, text: &str) -> SendOutcome {
        if self.state != SessionState::Idle {
            warn!(state = ?self.state, "send rejected, another action is in flight");
            return SendOutcome::Busy;
        }
        if let Err(rejection) = validate_outgoing_message(text, self.max_message_chars) {
            debug!(%rejection, "send rejected before request");
            return SendOutcome::Rejected(rejection);
        }

        self.transition(SessionState::Sending);
        self.messages.push(MessageRecord::user(text));

        let origin = self.conversation_id.clone();
        self.transition(SessionState::AwaitingResponse);
        let result = self
            .gateway
            .send(text, &origin, self.language.as_deref())
            .await;

        self.apply_reply(&origin, result)
    }

    /// Apply a gateway result to the conversation it originated from.
    ///
    /// A reply whose originating conversation is no longer active is
    /// dropped; the then-current message list is left untouched.
    fn apply_reply(
        &mut self,
        origin: &str,
        result: Result<ChatReply, ChatError>,
    ) -> SendOutcome {
        if origin != self.conversation_id {
            debug!(origin, active = %self.conversation_id, "dropping reply for abandoned conversation");
            if self.state != SessionState::Idle {
                self.transition(SessionState::Idle);
            }
            return SendOutcome::Stale;
        }

        match result {
            Ok(reply) => {
                self.messages
                    .push(MessageRecord::assistant(reply.response, reply.sources));
                self.transition(SessionState::Idle);
                SendOutcome::Replied
            }
            Err(error) => {
                warn!(%error, "chat request failed");
                self.transition(SessionState::Error);
                self.messages.push(MessageRecord::assistant_error(ERROR_REPLY_TEXT));
                self.transition(SessionState::Idle);
                SendOutcome::Failed
            }
        }
    }

    /// Persist the active conversation (if it has any messages) and start a
    /// fresh one.
    ///
    /// On a write failure the session still resets; the error is returned
    /// so the caller can surface a warning.
    pub fn new_conversation(&mut self) -> Result<(), StoreError> {
        let result = self.persist_active();
        self.reset();
        result
    }

    /// Remove a conversation from the persisted history.
    ///
    /// Deleting the active conversation discards its in-memory messages and
    /// starts fresh. An explicitly deleted conversation is not re-saved.
    /// Returns whether a stored record was removed.
    pub fn delete_conversation(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut history = self.store.load(&StorageScope::Active);
        let removed = history.remove(id);
        if removed {
            self.store.save(&StorageScope::Active, &history)?;
        }
        if id == self.conversation_id {
            self.reset();
        }
        Ok(removed)
    }

    /// Make a stored conversation the active one, replacing the in-memory
    /// message list. No request is sent.
    pub fn load_conversation(&mut self, id: &str) -> Result<(), DomainError> {
        let history = self.store.load(&StorageScope::Active);
        let record = history
            .find(id)
            .ok_or_else(|| DomainError::UnknownConversation(id.to_string()))?;
        self.conversation_id = record.id.clone();
        self.messages = record.messages.clone();
        self.state = SessionState::Idle;
        debug!(id, messages = self.messages.len(), "loaded conversation");
        Ok(())
    }

    /// Delete every stored conversation in the active scope and start
    /// fresh.
    pub fn clear_history(&mut self) {
        self.store.clear(&StorageScope::Active);
        self.reset();
    }

    /// Drop the in-memory session without persisting and start fresh.
    ///
    /// Used after the active scope changed underneath the session
    /// (login/logout), when the old messages belong to another identity.
    pub fn start_over(&mut self) {
        self.reset();
    }

    fn persist_active(&mut self) -> Result<(), StoreError> {
        let Some(record) =
            ConversationRecord::from_messages(self.conversation_id.clone(), self.messages.clone())
        else {
            return Ok(());
        };
        let mut history = self.store.load(&StorageScope::Active);
        history.remember(record);
        self.store.save(&StorageScope::Active, &history)
    }

    fn reset(&mut self) {
        self.conversation_id = generate_conversation_id();
        self.messages.clear();
        self.state = SessionState::Idle;
    }

    fn transition(&mut self, to: SessionState) {
        debug!(from = ?self.state, to = ?to, "session state");
        self.state = to;
    }
}
