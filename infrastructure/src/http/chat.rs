//! HTTP adapter for the chat endpoint.

use super::protocol::{ApiErrorBody, ChatRequest, ChatResponse, source_label};
use arnica_application::{ChatError, ChatGateway, ChatReply};
use async_trait::async_trait;
use tracing::debug;

/// [`ChatGateway`] adapter over `POST /api/chat`.
///
/// A 2xx answer becomes a [`ChatReply`]; a non-2xx answer with an `{error}`
/// body surfaces the server's message, anything else is a transport error.
pub struct HttpChatGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChatGateway {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    async fn send(
        &self,
        message: &str,
        conversation_id: &str,
        language: Option<&str>,
    ) -> Result<ChatReply, ChatError> {
        debug!(conversation_id, chars = message.chars().count(), "sending chat request");

        let response = self
            .client
            .post(self.endpoint())
            .json(&ChatRequest {
                message,
                conversation_id,
                language,
            })
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return match response.json::<ApiErrorBody>().await {
                Ok(body) => Err(ChatError::Rejected(body.error)),
                Err(_) => Err(ChatError::Transport(format!("HTTP {status}"))),
            };
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        Ok(ChatReply {
            response: body.response,
            sources: body.sources.iter().map(source_label).collect(),
        })
    }
}
