pub mod deepseek;
pub mod gateway;
pub mod openai;
pub mod prompt;
pub mod registry;
pub mod traits;

pub use gateway::ChatGateway;
pub use registry::{ProviderConfig, ProviderId, ProviderRegistry};
pub use traits::{ChatMessage, ChatTransport, Role};
