use thiserror::Error;

use crate::funds::FundOperation;

#[derive(Error, Debug)]
pub enum FundtrackError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    // Provider errors
    #[error("Unrecognized AI provider '{provider}'")]
    UnknownProvider { provider: String },

    #[error("{provider} API error: {status}")]
    ProviderApi { provider: String, status: u16 },

    #[error("Malformed response from {origin}: {reason}")]
    MalformedResponse { origin: String, reason: String },

    // Fund backend errors
    #[error("{operation} (HTTP {status})")]
    FundApi { operation: FundOperation, status: u16 },

    // Navigation errors
    #[error("No view matches path: {path}")]
    RouteNotFound { path: String },

    #[error("Invalid input: {0}")]
    Validation(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl FundtrackError {
    /// HTTP status of a remote rejection, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ProviderApi { status, .. } | Self::FundApi { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FundtrackError>;
