pub mod loader;
pub mod types;

pub use loader::{load_config, Credentials};
pub use types::{AiConfig, BackendConfig, FundtrackConfig, ProviderSettings};
