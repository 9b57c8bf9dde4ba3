use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{FundtrackError, Result};
use crate::providers::registry::ProviderConfig;
use crate::providers::traits::{ChatMessage, ChatTransport};

const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 2000;

/// Deepseek over plain HTTP: hand-built JSON body, untyped response.
pub struct DeepseekClient {
    client: Client,
}

impl DeepseekClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChatTransport for DeepseekClient {
    fn name(&self) -> &str {
        "deepseek"
    }

    async fn send_chat(
        &self,
        config: &ProviderConfig,
        messages: &[ChatMessage],
    ) -> Result<String> {
        let url = config.completions_url();
        let body = json!({
            "model": config.model,
            "messages": messages,
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        let mut request = self.client.post(&url).json(&body);
        if let Some(api_key) = &config.api_key {
            request = request.header(AUTHORIZATION, format!("Bearer {}", api_key));
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

        let data: Value = response.json().await?;
        extract_content(&data).ok_or_else(|| FundtrackError::MalformedResponse {
            origin: config.display_name.clone(),
            reason: "missing choices[0].message.content".to_string(),
        })
    }
}

fn extract_content(data: &Value) -> Option<String> {
    data.get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .map(String::from)
}
