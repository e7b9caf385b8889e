//! Storage scopes for persisted conversation lists

/// Which persisted conversation list a storage operation targets.
///
/// `Active` is the single unscoped key whose contents always belong to the
/// currently active identity. `UserSnapshot` is the identity-qualified key
/// holding one user's history independent of the active scope; snapshots are
/// reconciled with the active scope on login and logout, never read during a
/// live session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageScope {
    Active,
    UserSnapshot(String),
}

impl StorageScope {
    /// Snapshot scope for a user, keyed by their numeric account id.
    pub fn user_snapshot(user_id: i64) -> Self {
        StorageScope::UserSnapshot(user_id.to_string())
    }

    /// The storage key this scope maps to.
    pub fn key(&self) -> String {
        match self {
            StorageScope::Active => "conversations".to_string(),
            StorageScope::UserSnapshot(user_id) => format!("conversations-user-{user_id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_scope_key_is_unqualified() {
        assert_eq!(StorageScope::Active.key(), "conversations");
    }

    #[test]
    fn snapshot_key_is_identity_qualified() {
        assert_eq!(
            StorageScope::user_snapshot(42).key(),
            "conversations-user-42"
        );
    }

    #[test]
    fn distinct_users_get_distinct_keys() {
        assert_ne!(
            StorageScope::user_snapshot(1).key(),
            StorageScope::user_snapshot(2).key()
        );
    }
}
