//! Bounded, most-recent-first conversation history

use super::entities::ConversationRecord;
use serde::{Deserialize, Serialize};

/// Maximum number of conversations kept in a history list.
///
/// Remembering a conversation past this cap evicts the oldest entry.
pub const HISTORY_CAP: usize = 10;

/// The persisted list of conversations for one storage scope.
///
/// Invariants: length never exceeds [`HISTORY_CAP`], ordering is
/// most-recent-first, and `id`s are unique within the list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHistory {
    records: Vec<ConversationRecord>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a deserialized list, re-establishing the invariants in case the
    /// persisted data was written by an older build or edited by hand.
    pub fn from_records(mut records: Vec<ConversationRecord>) -> Self {
        records.truncate(HISTORY_CAP);
        Self { records }
    }

    pub fn records(&self) -> &[ConversationRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn find(&self, id: &str) -> Option<&ConversationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Prepend a conversation, replacing any earlier entry with the same id
    /// and evicting past the cap.
    pub fn remember(&mut self, record: ConversationRecord) {
        self.records.retain(|r| r.id != record.id);
        self.records.insert(0, record);
        self.records.truncate(HISTORY_CAP);
    }

    /// Remove the conversation with the given id. Returns whether anything
    /// was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::entities::MessageRecord;

    fn record(id: &str) -> ConversationRecord {
        ConversationRecord::from_messages(id, vec![MessageRecord::user(format!("msg for {id}"))])
            .unwrap()
    }

    #[test]
    fn remember_prepends() {
        let mut history = ConversationHistory::new();
        history.remember(record("a"));
        history.remember(record("b"));
        assert_eq!(history.records()[0].id, "b");
        assert_eq!(history.records()[1].id, "a");
    }

    #[test]
    fn length_never_exceeds_cap() {
        let mut history = ConversationHistory::new();
        for i in 0..25 {
            history.remember(record(&format!("conv-{i}")));
        }
        assert_eq!(history.len(), HISTORY_CAP);
        // Most recent first: the last remembered id leads the list
        assert_eq!(history.records()[0].id, "conv-24");
        // The oldest surviving entry is cap entries back
        assert_eq!(history.records()[HISTORY_CAP - 1].id, "conv-15");
    }

    #[test]
    fn remember_same_id_moves_to_front_without_duplicating() {
        let mut history = ConversationHistory::new();
        history.remember(record("a"));
        history.remember(record("b"));
        history.remember(record("a"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.records()[0].id, "a");
    }

    #[test]
    fn remove_reports_whether_found() {
        let mut history = ConversationHistory::new();
        history.remember(record("a"));
        assert!(history.remove("a"));
        assert!(!history.remove("a"));
        assert!(history.is_empty());
    }

    #[test]
    fn from_records_enforces_cap() {
        let records: Vec<_> = (0..15).map(|i| record(&format!("c{i}"))).collect();
        let history = ConversationHistory::from_records(records);
        assert_eq!(history.len(), HISTORY_CAP);
    }

    #[test]
    fn serializes_as_plain_list() {
        let mut history = ConversationHistory::new();
        history.remember(record("a"));
        let json = serde_json::to_value(&history).unwrap();
        assert!(json.is_array());
        let back: ConversationHistory = serde_json::from_value(json).unwrap();
        assert_eq!(back, history);
    }
}
