//! Identity domain entities

use serde::{Deserialize, Serialize};

/// A signed-in user as reported by the authentication service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Who the client is currently acting as
///
/// Guest is the unauthenticated default; it owns the active conversation
/// scope until a login swaps in a user snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    #[default]
    Guest,
    User(UserAccount),
}

impl Identity {
    pub fn is_guest(&self) -> bool {
        matches!(self, Identity::Guest)
    }

    pub fn user(&self) -> Option<&UserAccount> {
        match self {
            Identity::Guest => None,
            Identity::User(account) => Some(account),
        }
    }

    /// Display label for the status line: the username, or "guest".
    pub fn label(&self) -> &str {
        match self {
            Identity::Guest => "guest",
            Identity::User(account) => &account.username,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_is_default() {
        assert!(Identity::default().is_guest());
        assert_eq!(Identity::default().label(), "guest");
    }

    #[test]
    fn user_exposes_account() {
        let identity = Identity::User(UserAccount {
            id: 7,
            username: "ada".into(),
            email: "ada@example.com".into(),
        });
        assert!(!identity.is_guest());
        assert_eq!(identity.user().unwrap().id, 7);
        assert_eq!(identity.label(), "ada");
    }
}
