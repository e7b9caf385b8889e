//! HTTP adapter for the authentication endpoints.
//!
//! One POST per operation, no retry. The service signals refusal with
//! `success: false` and a user-facing message, independent of the HTTP
//! status, so bodies are parsed on every status and the flag decides.

use super::protocol::{
    LoginRequest, LoginResponse, LogoutRequest, RegisterRequest, RegisterResponse,
    ValidateRequest, ValidateResponse,
};
use arnica_application::{AuthError, AuthGateway, LoginGrant};
use arnica_domain::UserAccount;
use async_trait::async_trait;
use tracing::debug;

/// [`AuthGateway`] adapter over the `/api/auth/*` endpoints.
pub struct HttpAuthGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthGateway {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn transport(error: reqwest::Error) -> AuthError {
    AuthError::Transport(error.to_string())
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn validate(&self, session_token: &str) -> Result<Option<UserAccount>, AuthError> {
        let response = self
            .client
            .post(self.endpoint("/api/auth/validate"))
            .json(&ValidateRequest { session_token })
            .send()
            .await
            .map_err(transport)?;

        let body: ValidateResponse = response.json().await.map_err(transport)?;
        if body.success {
            Ok(body.user.map(UserAccount::from))
        } else {
            Ok(None)
        }
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginGrant, AuthError> {
        let response = self
            .client
            .post(self.endpoint("/api/auth/login"))
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(transport)?;

        let body: LoginResponse = response.json().await.map_err(transport)?;
        match (body.success, body.session_token, body.user) {
            (true, Some(session_token), Some(user)) => Ok(LoginGrant {
                session_token,
                user: user.into(),
            }),
            _ => Err(AuthError::Rejected(
                body.message.unwrap_or_else(|| "Login failed".to_string()),
            )),
        }
    }

    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let response = self
            .client
            .post(self.endpoint("/api/auth/register"))
            .json(&RegisterRequest {
                username,
                email,
                password,
            })
            .send()
            .await
            .map_err(transport)?;

        let body: RegisterResponse = response.json().await.map_err(transport)?;
        if body.success {
            Ok(())
        } else {
            Err(AuthError::Rejected(
                body.message
                    .unwrap_or_else(|| "Registration failed".to_string()),
            ))
        }
    }

    async fn logout(&self, session_token: &str) {
        let result = self
            .client
            .post(self.endpoint("/api/auth/logout"))
            .json(&LogoutRequest { session_token })
            .send()
            .await;
        if let Err(error) = result {
            debug!(%error, "server-side logout failed, proceeding with local cleanup");
        }
    }
}
