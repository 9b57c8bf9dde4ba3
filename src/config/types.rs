use serde::{Deserialize, Serialize};

use crate::providers::ProviderId;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000/api";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FundtrackConfig {
    pub backend: BackendConfig,
    pub ai: AiConfig,
}

/// Fund-tracking backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Origin of the fund API, including the `/api` prefix
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Provider used by `chat` when none is given on the command line
    pub default_provider: ProviderId,
    pub openai: ProviderSettings,
    pub deepseek: ProviderSettings,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            default_provider: ProviderId::OpenAI,
            openai: ProviderSettings::defaults_for(ProviderId::OpenAI),
            deepseek: ProviderSettings::defaults_for(ProviderId::Deepseek),
        }
    }
}

impl AiConfig {
    pub fn settings(&self, id: ProviderId) -> &ProviderSettings {
        match id {
            ProviderId::OpenAI => &self.openai,
            ProviderId::Deepseek => &self.deepseek,
        }
    }
}

/// Per-provider endpoint settings. The credential itself never lives in
/// the config file, only the name of the variable holding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Model identifier sent with every request
    pub model: String,
    /// Origin of the chat-completions endpoint
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl ProviderSettings {
    pub fn defaults_for(id: ProviderId) -> Self {
        match id {
            ProviderId::OpenAI => Self {
                model: "gpt-4o-mini".to_string(),
                base_url: "https://api.openai.com/v1".to_string(),
                api_key_env: "VUE_APP_OPENAI_API_KEY".to_string(),
            },
            ProviderId::Deepseek => Self {
                model: "deepseek-chat".to_string(),
                base_url: "https://api.deepseek.com/v1".to_string(),
                api_key_env: "VUE_APP_DEEPSEEK_API_KEY".to_string(),
            },
        }
    }
}
