use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{AiConfig, Credentials};
use crate::error::{FundtrackError, Result};

/// Closed set of AI backends the gateway can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProviderId {
    OpenAI,
    Deepseek,
}

impl ProviderId {
    pub const ALL: [ProviderId; 2] = [ProviderId::OpenAI, ProviderId::Deepseek];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAI => "OPENAI",
            Self::Deepseek => "DEEPSEEK",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Deepseek => "Deepseek",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = FundtrackError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FundtrackError::UnknownProvider {
                provider: s.to_string(),
            })
    }
}

/// Everything a transport needs to reach one provider.
#[derive(Clone)]
pub struct ProviderConfig {
    pub id: ProviderId,
    pub display_name: String,
    pub model: String,
    pub base_url: String,
    pub api_key: Option<String>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ProviderConfig {
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Read-only mapping from provider id to its configuration.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderId, ProviderConfig>,
}

impl ProviderRegistry {
    pub fn new(ai: &AiConfig, credentials: &Credentials) -> Self {
        let providers = ProviderId::ALL
            .into_iter()
            .map(|id| {
                let settings = ai.settings(id);
                let config = ProviderConfig {
                    id,
                    display_name: id.display_name().to_string(),
                    model: settings.model.clone(),
                    base_url: settings.base_url.clone(),
                    api_key: credentials.get(id).map(String::from),
                };
                (id, config)
            })
            .collect();

        Self { providers }
    }

    pub fn get(&self, id: ProviderId) -> Result<&ProviderConfig> {
        self.providers
            .get(&id)
            .ok_or_else(|| FundtrackError::UnknownProvider {
                provider: id.to_string(),
            })
    }

    /// Providers in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &ProviderConfig> {
        ProviderId::ALL
            .into_iter()
            .filter_map(move |id| self.providers.get(&id))
    }
}
