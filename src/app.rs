use serde_json::Value;
use tracing::debug;

use crate::config::{Credentials, FundtrackConfig};
use crate::error::Result;
use crate::funds::FundClient;
use crate::providers::{ChatGateway, ProviderRegistry};
use crate::routes::{navigate, Route};

/// Everything a command needs, built once at startup.
pub struct App {
    config: FundtrackConfig,
    funds: FundClient,
    gateway: ChatGateway,
}

/// Data behind one rendered view.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Collection {
        funds: Value,
    },
    Detail {
        name: String,
        code: String,
        estimate: Value,
    },
}

impl App {
    pub fn new(config: FundtrackConfig, credentials: &Credentials) -> Self {
        debug!(?credentials, "Building provider registry");
        let registry = ProviderRegistry::new(&config.ai, credentials);

        debug!(base_url = %config.backend.base_url, "Creating fund client");
        let funds = FundClient::new(config.backend.base_url.clone());

        debug!("Creating chat gateway");
        let gateway = ChatGateway::new(registry);

        Self {
            config,
            funds,
            gateway,
        }
    }

    pub fn config(&self) -> &FundtrackConfig {
        &self.config
    }

    pub fn funds(&self) -> &FundClient {
        &self.funds
    }

    pub fn gateway(&self) -> &ChatGateway {
        &self.gateway
    }

    /// Navigate to `path` and fetch what its view shows.
    pub async fn open(&self, path: &str) -> Result<View> {
        match navigate(path)? {
            Route::FundCollection => Ok(View::Collection {
                funds: self.funds.get_funds().await?,
            }),
            Route::FundDetail { name } => {
                let overview = self.funds.get_funds().await?;
                let code = find_fund_code(&overview, &name).unwrap_or_else(|| {
                    debug!(name = %name, "Fund not in overview, using name as code");
                    name.clone()
                });
                let estimate = self.funds.get_fund_estimate(&code).await?;
                Ok(View::Detail {
                    name,
                    code,
                    estimate,
                })
            }
        }
    }
}

/// Entries of an overview response, which is either a bare array or an
/// object holding one under `funds`.
pub fn fund_entries(overview: &Value) -> &[Value] {
    match overview {
        Value::Array(items) => items,
        Value::Object(map) => map
            .get("funds")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

/// Text form of a scalar field, whether the backend sent it as a string or a number.
pub fn field_text(entry: &Value, key: &str) -> Option<String> {
    match entry.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn find_fund_code(overview: &Value, name: &str) -> Option<String> {
    fund_entries(overview).iter().find_map(|entry| {
        let code = field_text(entry, "code")?;
        let matches = code == name || field_text(entry, "name").as_deref() == Some(name);
        matches.then_some(code)
    })
}
