//! Wire types for the chat service API.
//!
//! Request bodies borrow their fields; response bodies own theirs. The
//! service reports application-level failures as `success: false` with a
//! user-facing `message`, on both 2xx and error statuses, so response types
//! carry every field as optional except the `success` flag itself.

use arnica_domain::UserAccount;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ValidateRequest<'a> {
    pub session_token: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ValidateResponse {
    pub success: bool,
    #[serde(default)]
    pub user: Option<WireUser>,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub session_token: Option<String>,
    #[serde(default)]
    pub user: Option<WireUser>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogoutRequest<'a> {
    pub session_token: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub conversation_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    /// Source references backing the reply. Opaque to the client: plain
    /// strings are used verbatim, anything else keeps its JSON rendering.
    #[serde(default)]
    pub sources: Vec<serde_json::Value>,
}

/// Error body the chat endpoint returns with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// A user as the service reports it
#[derive(Debug, Clone, Deserialize)]
pub struct WireUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<WireUser> for UserAccount {
    fn from(user: WireUser) -> Self {
        UserAccount {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Render one source reference for display.
pub fn source_label(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
