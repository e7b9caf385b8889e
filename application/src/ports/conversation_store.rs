//! Port for persisted conversation history.
//!
//! Defines the [`ConversationStore`] trait over string-keyed storage scopes.
//! The scope-switch operations that move history between the active scope
//! and a user's identity-qualified snapshot are expressed as default methods
//! on top of `load`/`save`/`clear`, so every adapter gets the same
//! partitioning semantics.

use arnica_domain::{ConversationHistory, StorageScope};
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when writing to persistent storage.
///
/// Reads never fail: absent or malformed data loads as an empty history.
/// Write failures are surfaced so the caller can warn the user, but no
/// retry is attempted.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to write conversation history: {0}")]
    WriteFailed(String),
}

/// Key/value persistence of conversation history, partitioned by scope.
pub trait ConversationStore: Send + Sync {
    /// Load the history stored under `scope`.
    ///
    /// Absent keys and malformed data both load as an empty history.
    fn load(&self, scope: &StorageScope) -> ConversationHistory;

    /// Serialize and write `history` under `scope`. Last writer wins.
    fn save(&self, scope: &StorageScope, history: &ConversationHistory) -> Result<(), StoreError>;

    /// Remove whatever is stored under `scope`.
    fn clear(&self, scope: &StorageScope);

    /// Adopt a user's scope on login: copy their snapshot into the active
    /// scope, or clear the active scope when they have none. The guest's
    /// active history is not carried over.
    fn switch_on_login(&self, user_id: i64) -> Result<(), StoreError> {
        let snapshot = self.load(&StorageScope::user_snapshot(user_id));
        if snapshot.is_empty() {
            debug!(user_id, "no snapshot for user, clearing active scope");
            self.clear(&StorageScope::Active);
            Ok(())
        } else {
            debug!(user_id, conversations = snapshot.len(), "adopting user snapshot");
            self.save(&StorageScope::Active, &snapshot)
        }
    }

    /// Leave a user's scope on logout: snapshot the active scope into their
    /// identity-qualified key, then clear the active scope for the guest.
    fn switch_on_logout(&self, user_id: i64) -> Result<(), StoreError> {
        let active = self.load(&StorageScope::Active);
        debug!(user_id, conversations = active.len(), "snapshotting active scope");
        let result = self.save(&StorageScope::user_snapshot(user_id), &active);
        self.clear(&StorageScope::Active);
        result
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct InMemoryConversationStore {
    scopes: Mutex<HashMap<String, ConversationHistory>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversationStore for InMemoryConversationStore {
    fn load(&self, scope: &StorageScope) -> ConversationHistory {
        self.scopes
            .lock()
            .ok()
            .and_then(|scopes| scopes.get(&scope.key()).cloned())
            .unwrap_or_default()
    }

    fn save(&self, scope: &StorageScope, history: &ConversationHistory) -> Result<(), StoreError> {
        if let Ok(mut scopes) = self.scopes.lock() {
            scopes.insert(scope.key(), history.clone());
        }
        Ok(())
    }

    fn clear(&self, scope: &StorageScope) {
        if let Ok(mut scopes) = self.scopes.lock() {
            scopes.remove(&scope.key());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arnica_domain::{ConversationRecord, MessageRecord};

    fn history_with(ids: &[&str]) -> ConversationHistory {
        let mut history = ConversationHistory::new();
        for id in ids.iter().rev() {
            history.remember(
                ConversationRecord::from_messages(*id, vec![MessageRecord::user("hi")]).unwrap(),
            );
        }
        history
    }

    #[test]
    fn absent_scope_loads_empty() {
        let store = InMemoryConversationStore::new();
        assert!(store.load(&StorageScope::Active).is_empty());
    }

    #[test]
    fn login_adopts_existing_snapshot() {
        let store = InMemoryConversationStore::new();
        store
            .save(&StorageScope::user_snapshot(1), &history_with(&["u1-a"]))
            .unwrap();
        store
            .save(&StorageScope::Active, &history_with(&["guest-a"]))
            .unwrap();

        store.switch_on_login(1).unwrap();

        let active = store.load(&StorageScope::Active);
        assert_eq!(active.len(), 1);
        assert_eq!(active.records()[0].id, "u1-a");
    }

    #[test]
    fn login_without_snapshot_clears_active() {
        let store = InMemoryConversationStore::new();
        store
            .save(&StorageScope::Active, &history_with(&["guest-a"]))
            .unwrap();

        store.switch_on_login(2).unwrap();

        assert!(store.load(&StorageScope::Active).is_empty());
    }

    #[test]
    fn logout_snapshots_then_clears() {
        let store = InMemoryConversationStore::new();
        let active = history_with(&["u1-a", "u1-b"]);
        store.save(&StorageScope::Active, &active).unwrap();

        store.switch_on_logout(1).unwrap();

        assert_eq!(store.load(&StorageScope::user_snapshot(1)), active);
        assert!(store.load(&StorageScope::Active).is_empty());
    }

    #[test]
    fn snapshots_are_partitioned_per_user() {
        let store = InMemoryConversationStore::new();
        store.save(&StorageScope::Active, &history_with(&["u1-a"])).unwrap();
        store.switch_on_logout(1).unwrap();

        store.save(&StorageScope::Active, &history_with(&["u2-a"])).unwrap();
        store.switch_on_logout(2).unwrap();

        // Logging back in as user 1 restores exactly what they left behind
        store.switch_on_login(1).unwrap();
        let active = store.load(&StorageScope::Active);
        assert_eq!(active.len(), 1);
        assert_eq!(active.records()[0].id, "u1-a");
    }
}
