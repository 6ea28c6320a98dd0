pub mod enrichment;
pub mod models;
pub mod provider;

// Re-export public APIs
pub use enrichment::EnrichmentClient;
pub use models::{ChatMessage, EnrichmentResult, ProviderConfig};
pub use provider::{ChatCompletionsProvider, ModelProvider};
