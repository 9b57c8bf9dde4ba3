use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::types::{AiConfig, FundtrackConfig};
use crate::error::{FundtrackError, Result};
use crate::providers::ProviderId;

/// Get the default configuration file path
pub fn get_config_path() -> PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("com", "fundtrack", "fundtrack") {
        proj_dirs.config_dir().join("config.toml")
    } else {
        // Fallback to home directory
        dirs_fallback().join(".fundtrack").join("config.toml")
    }
}

fn dirs_fallback() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Load configuration from file, with defaults for missing values
pub fn load_config(config_path: Option<&Path>) -> Result<FundtrackConfig> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(get_config_path);

    if !path.exists() {
        debug!(path = %path.display(), "No config file, using defaults");
        return Ok(FundtrackConfig::default());
    }

    let content = std::fs::read_to_string(&path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<FundtrackConfig> {
    toml::from_str(content).map_err(|e| FundtrackError::TomlParse(e.to_string()))
}

/// API keys resolved once at startup.
///
/// Absent keys are kept as absent; the remote API rejects the request
/// at call time.
#[derive(Clone, Default)]
pub struct Credentials {
    keys: HashMap<ProviderId, String>,
}

impl Credentials {
    /// Read every provider's key from the variable named in its settings.
    pub fn from_env(ai: &AiConfig) -> Self {
        let keys = ProviderId::ALL
            .iter()
            .filter_map(|&id| {
                std::env::var(&ai.settings(id).api_key_env)
                    .ok()
                    .filter(|key| !key.is_empty())
                    .map(|key| (id, key))
            })
            .collect();
        Self { keys }
    }

    pub fn with_key(mut self, id: ProviderId, key: impl Into<String>) -> Self {
        self.keys.insert(id, key.into());
        self
    }

    pub fn get(&self, id: ProviderId) -> Option<&str> {
        self.keys.get(&id).map(String::as_str)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut present: Vec<_> = self.keys.keys().collect();
        present.sort_by_key(|id| id.as_str());
        f.debug_struct("Credentials")
            .field("present", &present)
            .finish()
    }
}
