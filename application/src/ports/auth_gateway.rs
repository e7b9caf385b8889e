//! Authentication gateway port
//!
//! Defines how the application layer talks to the remote authentication
//! service. Every call is one-shot: no retry, no backoff. Negative
//! responses carry the server's message so it can be shown inline.

use arnica_domain::UserAccount;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during authentication operations
#[derive(Error, Debug)]
pub enum AuthError {
    /// The service answered and said no; the message is user-facing.
    #[error("{0}")]
    Rejected(String),

    /// The service could not be reached or answered garbage.
    #[error("Connection error: {0}")]
    Transport(String),
}

/// A successful login: the token to persist plus the account it belongs to.
#[derive(Debug, Clone)]
pub struct LoginGrant {
    pub session_token: String,
    pub user: UserAccount,
}

/// Gateway to the remote authentication service
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Check whether a stored session token is still good.
    ///
    /// `Ok(None)` means the service rejected the token (expired or revoked);
    /// transport failures are errors so the caller can tell them apart.
    async fn validate(&self, session_token: &str) -> Result<Option<UserAccount>, AuthError>;

    async fn login(&self, email: &str, password: &str) -> Result<LoginGrant, AuthError>;

    async fn register(&self, username: &str, email: &str, password: &str)
    -> Result<(), AuthError>;

    /// Invalidate the session server-side. Best-effort: failures are
    /// swallowed by the adapter and the client proceeds with local cleanup.
    async fn logout(&self, session_token: &str);
}
