//! Session management use case.
//!
//! Establishes identity against the remote authentication service and keeps
//! the persisted conversation scope in step with it: login adopts the
//! user's snapshot, logout snapshots the active scope back. The chat
//! session is a collaborator injected by the caller, not a global; after a
//! scope switch the caller reloads conversation-dependent state itself.

use crate::ports::auth_gateway::{AuthError, AuthGateway};
use crate::ports::conversation_store::ConversationStore;
use crate::ports::preference_store::PreferenceStore;
use arnica_domain::Identity;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Minimum password length checked client-side before any network call.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Errors surfaced to the login/register forms as plain text.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Client-side validation failure; no request was made.
    #[error("{0}")]
    Validation(String),

    /// The service answered and refused.
    #[error("{0}")]
    Denied(String),

    /// The service could not be reached.
    #[error("Connection error: {0}")]
    Transport(String),
}

impl From<AuthError> for SessionError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Rejected(message) => SessionError::Denied(message),
            AuthError::Transport(message) => SessionError::Transport(message),
        }
    }
}

/// Use case owning the current identity and the session token lifecycle.
pub struct SessionManagerUseCase {
    auth: Arc<dyn AuthGateway>,
    conversations: Arc<dyn ConversationStore>,
    preferences: Arc<dyn PreferenceStore>,
    identity: Identity,
    min_password_chars: usize,
}

impl SessionManagerUseCase {
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        conversations: Arc<dyn ConversationStore>,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Self {
        Self {
            auth,
            conversations,
            preferences,
            identity: Identity::Guest,
            min_password_chars: MIN_PASSWORD_CHARS,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Re-establish identity from the stored session token at startup.
    ///
    /// A missing token, a negative answer and a transport failure all end
    /// the same way: the token is discarded and the client is a guest. No
    /// scope switch happens here: the active scope already reflects the
    /// identity that last used it.
    pub async fn restore(&mut self) -> &Identity {
        let Some(token) = self.preferences.session_token() else {
            self.identity = Identity::Guest;
            return &self.identity;
        };

        match self.auth.validate(&token).await {
            Ok(Some(user)) => {
                info!(username = %user.username, "session restored");
                self.identity = Identity::User(user);
            }
            Ok(None) => {
                info!("stored session no longer valid, continuing as guest");
                self.preferences.clear_session_token();
                self.identity = Identity::Guest;
            }
            Err(error) => {
                warn!(%error, "session validation failed, continuing as guest");
                self.preferences.clear_session_token();
                self.identity = Identity::Guest;
            }
        }
        &self.identity
    }

    /// Log in and switch the conversation scope to the user's snapshot.
    ///
    /// The scope switch happens before this returns, so the caller can
    /// reload conversation-dependent state immediately afterwards.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&Identity, SessionError> {
        let grant = self.auth.login(email, password).await?;

        if let Err(error) = self.preferences.set_session_token(&grant.session_token) {
            warn!(%error, "could not persist session token");
        }
        if let Err(error) = self.conversations.switch_on_login(grant.user.id) {
            warn!(%error, "could not adopt user conversation snapshot");
        }

        info!(username = %grant.user.username, "logged in");
        self.identity = Identity::User(grant.user);
        Ok(&self.identity)
    }

    /// Register a new account, then log straight into it.
    ///
    /// The password length check runs client-side; a short password never
    /// reaches the network.
    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<&Identity, SessionError> {
        if password.chars().count() < self.min_password_chars {
            return Err(SessionError::Validation(format!(
                "Password must be at least {} characters",
                self.min_password_chars
            )));
        }

        self.auth.register(username, email, password).await?;
        info!(username, "account created, logging in");
        self.login(email, password).await
    }

    /// Log out: best-effort server-side invalidation, snapshot the active
    /// conversation scope under the user's key, clear the token, reset to
    /// guest.
    pub async fn logout(&mut self) {
        if let Some(token) = self.preferences.session_token() {
            self.auth.logout(&token).await;
        }

        if let Identity::User(account) = &self.identity {
            if let Err(error) = self.conversations.switch_on_logout(account.id) {
                warn!(%error, "could not snapshot conversation history");
            }
            info!(username = %account.username, "logged out");
        }

        self.preferences.clear_session_token();
        self.identity = Identity::Guest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::auth_gateway::LoginGrant;
    use crate::ports::conversation_store::InMemoryConversationStore;
    use crate::ports::preference_store::InMemoryPreferenceStore;
    use arnica_domain::{
        ConversationHistory, ConversationRecord, MessageRecord, StorageScope, UserAccount,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==================== Test Mocks ====================

    #[derive(Default)]
    struct MockAuthGateway {
        calls: AtomicUsize,
        fail_transport: bool,
        reject_message: Option<String>,
        reject_validate: bool,
    }

    impl MockAuthGateway {
        fn accepting() -> Self {
            Self::default()
        }

        fn rejecting(message: &str) -> Self {
            Self {
                reject_message: Some(message.to_string()),
                ..Self::default()
            }
        }

        fn unreachable() -> Self {
            Self {
                fail_transport: true,
                ..Self::default()
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn account() -> UserAccount {
            UserAccount {
                id: 1,
                username: "ada".into(),
                email: "ada@example.com".into(),
            }
        }

        fn check(&self) -> Result<(), AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_transport {
                return Err(AuthError::Transport("connection refused".into()));
            }
            if let Some(message) = &self.reject_message {
                return Err(AuthError::Rejected(message.clone()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl AuthGateway for MockAuthGateway {
        async fn validate(&self, _token: &str) -> Result<Option<UserAccount>, AuthError> {
            self.check()?;
            if self.reject_validate {
                return Ok(None);
            }
            Ok(Some(Self::account()))
        }

        async fn login(&self, _email: &str, _password: &str) -> Result<LoginGrant, AuthError> {
            self.check()?;
            Ok(LoginGrant {
                session_token: "tok-1".into(),
                user: Self::account(),
            })
        }

        async fn register(
            &self,
            _username: &str,
            _email: &str,
            _password: &str,
        ) -> Result<(), AuthError> {
            self.check()
        }

        async fn logout(&self, _token: &str) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct Fixture {
        auth: Arc<MockAuthGateway>,
        conversations: Arc<InMemoryConversationStore>,
        preferences: Arc<InMemoryPreferenceStore>,
        manager: SessionManagerUseCase,
    }

    fn fixture(auth: MockAuthGateway) -> Fixture {
        let auth = Arc::new(auth);
        let conversations = Arc::new(InMemoryConversationStore::new());
        let preferences = Arc::new(InMemoryPreferenceStore::new());
        let manager = SessionManagerUseCase::new(
            auth.clone(),
            conversations.clone(),
            preferences.clone(),
        );
        Fixture {
            auth,
            conversations,
            preferences,
            manager,
        }
    }

    fn history_with(id: &str) -> ConversationHistory {
        let mut history = ConversationHistory::new();
        history.remember(
            ConversationRecord::from_messages(id, vec![MessageRecord::user("hi")]).unwrap(),
        );
        history
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn short_password_is_rejected_without_network_call() {
        let mut f = fixture(MockAuthGateway::accepting());

        let result = f.manager.register("ada", "ada@example.com", "12345").await;

        assert!(matches!(result, Err(SessionError::Validation(_))));
        assert_eq!(f.auth.call_count(), 0);
        assert!(f.manager.identity().is_guest());
    }

    #[tokio::test]
    async fn register_chains_into_login() {
        let mut f = fixture(MockAuthGateway::accepting());

        let identity = f
            .manager
            .register("ada", "ada@example.com", "123456")
            .await
            .unwrap();

        assert_eq!(identity.user().unwrap().username, "ada");
        // register + login
        assert_eq!(f.auth.call_count(), 2);
        assert_eq!(f.preferences.session_token().as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn login_adopts_user_snapshot() {
        let mut f = fixture(MockAuthGateway::accepting());
        f.conversations
            .save(&StorageScope::user_snapshot(1), &history_with("u1-conv"))
            .unwrap();
        f.conversations
            .save(&StorageScope::Active, &history_with("guest-conv"))
            .unwrap();

        f.manager.login("ada@example.com", "123456").await.unwrap();

        let active = f.conversations.load(&StorageScope::Active);
        assert_eq!(active.records()[0].id, "u1-conv");
        assert!(active.find("guest-conv").is_none());
    }

    #[tokio::test]
    async fn login_without_snapshot_hides_guest_history() {
        let mut f = fixture(MockAuthGateway::accepting());
        f.conversations
            .save(&StorageScope::Active, &history_with("guest-conv"))
            .unwrap();

        f.manager.login("ada@example.com", "123456").await.unwrap();

        assert!(f.conversations.load(&StorageScope::Active).is_empty());
    }

    #[tokio::test]
    async fn rejected_login_keeps_guest_and_token_clear() {
        let mut f = fixture(MockAuthGateway::rejecting("Invalid email or password"));

        let result = f.manager.login("ada@example.com", "wrong").await;

        match result {
            Err(SessionError::Denied(message)) => {
                assert_eq!(message, "Invalid email or password")
            }
            other => panic!("expected Denied, got {other:?}"),
        }
        assert!(f.manager.identity().is_guest());
        assert_eq!(f.preferences.session_token(), None);
    }

    #[tokio::test]
    async fn logout_snapshots_and_restores_on_next_login() {
        let mut f = fixture(MockAuthGateway::accepting());
        f.manager.login("ada@example.com", "123456").await.unwrap();
        f.conversations
            .save(&StorageScope::Active, &history_with("u1-conv"))
            .unwrap();

        f.manager.logout().await;

        assert!(f.manager.identity().is_guest());
        assert_eq!(f.preferences.session_token(), None);
        assert!(f.conversations.load(&StorageScope::Active).is_empty());

        // Logging back in restores the snapshot exactly as it was saved
        f.manager.login("ada@example.com", "123456").await.unwrap();
        let active = f.conversations.load(&StorageScope::Active);
        assert_eq!(active.records()[0].id, "u1-conv");
    }

    #[tokio::test]
    async fn restore_with_valid_token_signs_in() {
        let mut f = fixture(MockAuthGateway::accepting());
        f.preferences.set_session_token("tok-1").unwrap();

        let identity = f.manager.restore().await;

        assert_eq!(identity.user().unwrap().id, 1);
    }

    #[tokio::test]
    async fn restore_with_rejected_token_discards_it() {
        let mut f = fixture(MockAuthGateway {
            reject_validate: true,
            ..MockAuthGateway::default()
        });
        f.preferences.set_session_token("tok-stale").unwrap();

        let identity = f.manager.restore().await;

        assert!(identity.is_guest());
        assert_eq!(f.preferences.session_token(), None);
    }

    #[tokio::test]
    async fn restore_on_transport_failure_discards_token() {
        let mut f = fixture(MockAuthGateway::unreachable());
        f.preferences.set_session_token("tok-1").unwrap();

        let identity = f.manager.restore().await;

        assert!(identity.is_guest());
        assert_eq!(f.preferences.session_token(), None);
    }

    #[tokio::test]
    async fn restore_without_token_is_guest() {
        let mut f = fixture(MockAuthGateway::accepting());

        let identity = f.manager.restore().await;

        assert!(identity.is_guest());
        assert_eq!(f.auth.call_count(), 0);
    }
}
