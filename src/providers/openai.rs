use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FundtrackError, Result};
use crate::providers::registry::ProviderConfig;
use crate::providers::traits::{ChatMessage, ChatTransport};

/// Typed client for the OpenAI chat-completions API.
pub struct OpenAIClient {
    client: Client,
}

impl OpenAIClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChatTransport for OpenAIClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn send_chat(
        &self,
        config: &ProviderConfig,
        messages: &[ChatMessage],
    ) -> Result<String> {
        let url = config.completions_url();

        let api_request = ChatCompletionRequest {
            model: &config.model,
            messages,
            store: true,
        };

        let mut request = self.client.post(&url).json(&api_request);
        if let Some(api_key) = &config.api_key {
            request = request.bearer_auth(api_key);
        }

        debug!(url = %url, model = %config.model, "Sending chat completion");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FundtrackError::ProviderApi {
                provider: config.display_name.clone(),
                status: status.as_u16(),
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion.into_text(&config.display_name)
    }
}

// OpenAI API types

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    store: bool,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

impl ChatCompletionResponse {
    fn into_text(self, provider: &str) -> Result<String> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| FundtrackError::MalformedResponse {
                origin: provider.to_string(),
                reason: "response has no choices".to_string(),
            })?;

        choice
            .message
            .content
            .ok_or_else(|| FundtrackError::MalformedResponse {
                origin: provider.to_string(),
                reason: "first choice has no message content".to_string(),
            })
    }
}
