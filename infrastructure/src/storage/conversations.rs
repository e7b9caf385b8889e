//! File-backed conversation store.
//!
//! Serializes each scope's history as a JSON array in its own file via
//! [`FileKvStore`]. Malformed data is discarded with a warning rather than
//! surfaced; a corrupt history file must never take the chat down.

use super::kv::FileKvStore;
use arnica_application::{ConversationStore, StoreError};
use arnica_domain::{ConversationHistory, ConversationRecord, StorageScope};
use std::sync::Arc;
use tracing::warn;

/// [`ConversationStore`] adapter over one file per storage scope.
pub struct FileConversationStore {
    kv: Arc<FileKvStore>,
}

impl FileConversationStore {
    pub fn new(kv: Arc<FileKvStore>) -> Self {
        Self { kv }
    }
}

impl ConversationStore for FileConversationStore {
    fn load(&self, scope: &StorageScope) -> ConversationHistory {
        let key = scope.key();
        let Some(raw) = self.kv.get(&key) else {
            return ConversationHistory::new();
        };
        match serde_json::from_str::<Vec<ConversationRecord>>(&raw) {
            Ok(records) => ConversationHistory::from_records(records),
            Err(e) => {
                warn!(key, error = %e, "discarding malformed conversation history");
                ConversationHistory::new()
            }
        }
    }

    fn save(&self, scope: &StorageScope, history: &ConversationHistory) -> Result<(), StoreError> {
        let raw = serde_json::to_string(history.records())
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        self.kv.set(&scope.key(), &raw)
    }

    fn clear(&self, scope: &StorageScope) {
        self.kv.remove(&scope.key());
    }
}
