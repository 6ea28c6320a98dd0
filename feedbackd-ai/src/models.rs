use serde::{Serialize, Deserialize};

/// Configuration for the enrichment provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL for API requests
    pub api_base: Option<String>,

    /// API key for authentication
    pub api_key: String,

    /// Model to use with this provider
    pub model: String,
}

/// One message in a chat-style prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

/// Validated output of one enrichment attempt.
///
/// `actions` holds 1..=8 entries, each non-empty after trimming. Discarded
/// once folded into a submission update.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentResult {
    pub user_response: String,
    pub summary: String,
    pub actions: Vec<String>,
}
