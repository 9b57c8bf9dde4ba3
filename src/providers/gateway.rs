use std::sync::Arc;

use reqwest::Client;
use tracing::{error, info, warn};

use crate::error::Result;
use crate::providers::deepseek::DeepseekClient;
use crate::providers::openai::OpenAIClient;
use crate::providers::prompt::build_conversation;
use crate::providers::registry::{ProviderId, ProviderRegistry};
use crate::providers::traits::ChatTransport;

/// Single entry point for asking any registered provider one question.
///
/// Each call is one stateless round trip: the persona prompt and the
/// caller's message go out, the first completion's text comes back. There
/// are no retries and nothing is cached between calls.
pub struct ChatGateway {
    registry: ProviderRegistry,
    openai: Arc<dyn ChatTransport>,
    deepseek: Arc<dyn ChatTransport>,
}

impl ChatGateway {
    pub fn new(registry: ProviderRegistry) -> Self {
        let client = Client::new();
        Self {
            registry,
            openai: Arc::new(OpenAIClient::new(client.clone())),
            deepseek: Arc::new(DeepseekClient::new(client)),
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Chat with the provider named by `provider` (e.g. `"OPENAI"`).
    ///
    /// An unrecognized name fails before any network request is made.
    pub async fn chat(&self, provider: &str, message: &str) -> Result<String> {
        let id = provider.parse::<ProviderId>().inspect_err(|e| {
            error!(provider = %provider, error = %e, "Rejected chat request");
        })?;
        self.chat_with(id, message).await
    }

    pub async fn chat_with(&self, id: ProviderId, message: &str) -> Result<String> {
        let config = self.registry.get(id)?;
        let messages = build_conversation(message);
        let transport = self.transport(id);

        if config.api_key.is_none() {
            warn!(provider = %id, "No API key configured, the provider will likely reject this request");
        }
        info!(provider = %id, transport = transport.name(), "Sending chat request");

        transport
            .send_chat(config, &messages)
            .await
            .inspect_err(|e| {
                error!(provider = %config.display_name, error = %e, "Chat request failed");
            })
    }

    fn transport(&self, id: ProviderId) -> &Arc<dyn ChatTransport> {
        match id {
            ProviderId::OpenAI => &self.openai,
            ProviderId::Deepseek => &self.deepseek,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::{AiConfig, Credentials};
    use crate::error::FundtrackError;
    use crate::providers::prompt::SYSTEM_PROMPT;
    use crate::test_support::{closed_base_url, MockServer};

    fn gateway_for(base_url: &str) -> ChatGateway {
        let mut ai = AiConfig::default();
        ai.openai.base_url = base_url.to_string();
        ai.deepseek.base_url = base_url.to_string();
        let creds = Credentials::default()
            .with_key(ProviderId::OpenAI, "sk-openai")
            .with_key(ProviderId::Deepseek, "sk-deepseek");
        ChatGateway::new(ProviderRegistry::new(&ai, &creds))
    }

    fn completion(text: &str) -> serde_json::Value {
        json!({"choices": [{"message": {"role": "assistant", "content": text}}]})
    }

    #[tokio::test]
    async fn test_every_provider_returns_text() {
        for id in ProviderId::ALL {
            let server = MockServer::start(200, completion("回答")).await;
            let gateway = gateway_for(&server.base_url);

            let reply = gateway.chat(id.as_str(), "hi").await.unwrap();
            assert_eq!(reply, "回答");
            assert_eq!(server.requests().len(), 1, "provider {}", id);
        }
    }

    #[tokio::test]
    async fn test_every_provider_fails_on_remote_error() {
        for id in ProviderId::ALL {
            let server = MockServer::start(500, json!({"error": "down"})).await;
            let gateway = gateway_for(&server.base_url);

            let err = gateway.chat(id.as_str(), "hi").await.unwrap_err();
            assert_eq!(err.status(), Some(500), "provider {}", id);
            assert_eq!(server.requests().len(), 1);
        }
    }

    #[tokio::test]
    async fn test_unknown_provider_makes_no_request() {
        let server = MockServer::start(200, completion("unused")).await;
        let gateway = gateway_for(&server.base_url);

        let err = gateway.chat("UNKNOWN", "hi").await.unwrap_err();
        assert!(matches!(err, FundtrackError::UnknownProvider { ref provider } if provider == "UNKNOWN"));
        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn test_conversation_is_persona_then_message() {
        let message = "债券基金和货币基金有什么区别？";
        for id in ProviderId::ALL {
            let server = MockServer::start(200, completion("ok")).await;
            let gateway = gateway_for(&server.base_url);
            gateway.chat_with(id, message).await.unwrap();

            let body = server.requests()[0].json();
            assert_eq!(
                body["messages"],
                json!([
                    {"role": "system", "content": SYSTEM_PROMPT},
                    {"role": "user", "content": message},
                ]),
                "provider {}",
                id
            );
        }
    }

    #[tokio::test]
    async fn test_missing_key_fails_at_call_time() {
        let server = MockServer::start(401, json!({"error": {"message": "missing key"}})).await;
        let mut ai = AiConfig::default();
        ai.deepseek.base_url = server.base_url.clone();
        let gateway = ChatGateway::new(ProviderRegistry::new(&ai, &Credentials::default()));

        let err = gateway.chat("DEEPSEEK", "hi").await.unwrap_err();
        assert!(matches!(err, FundtrackError::ProviderApi { status: 401, .. }));

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].header("authorization"), None);
    }

    #[tokio::test]
    async fn test_success_without_choices_is_malformed() {
        for id in ProviderId::ALL {
            let server = MockServer::start(200, json!({"error": "x"})).await;
            let gateway = gateway_for(&server.base_url);

            let err = gateway.chat(id.as_str(), "hi").await.unwrap_err();
            assert!(
                matches!(err, FundtrackError::MalformedResponse { .. }),
                "provider {}: {:?}",
                id,
                err
            );
            assert_eq!(server.requests().len(), 1);
        }
    }

    #[tokio::test]
    async fn test_success_with_non_json_body_is_error() {
        for id in ProviderId::ALL {
            let server = MockServer::start_raw(200, "text/plain", "upstream timeout").await;
            let gateway = gateway_for(&server.base_url);

            let err = gateway.chat(id.as_str(), "hi").await.unwrap_err();
            assert!(
                matches!(err, FundtrackError::Http(ref e) if e.is_decode()),
                "provider {}: {:?}",
                id,
                err
            );
            assert_eq!(server.requests().len(), 1);
        }
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let gateway = gateway_for(&closed_base_url().await);
        let err = gateway.chat("DEEPSEEK", "hi").await.unwrap_err();
        assert!(matches!(err, FundtrackError::Http(_)));
    }
}
