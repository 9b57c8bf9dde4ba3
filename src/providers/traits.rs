use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::providers::registry::ProviderConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One way of getting a single non-streaming completion out of a provider.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Transport name identifier
    fn name(&self) -> &str;

    /// Send the conversation and return the assistant's reply text
    async fn send_chat(&self, config: &ProviderConfig, messages: &[ChatMessage])
        -> Result<String>;
}
