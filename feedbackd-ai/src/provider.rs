use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::models::{ChatMessage, ProviderConfig};

const DEFAULT_API_BASE: &str = "https://api.cerebras.ai/v1";

/// A chat-capable language-model backend.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn chat(&self, messages: Vec<ChatMessage>) -> anyhow::Result<String>;
}

/// Provider for OpenAI-compatible chat-completions APIs (Cerebras by default)
pub struct ChatCompletionsProvider {
    config: ProviderConfig,
    client: Client,
}

impl ChatCompletionsProvider {
    /// Create a new provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = Client::new();
        Self { config, client }
    }
}

#[async_trait]
impl ModelProvider for ChatCompletionsProvider {
    fn name(&self) -> &str {
        "chat-completions"
    }

    async fn chat(&self, messages: Vec<ChatMessage>) -> anyhow::Result<String> {
        let api_base = self.config.api_base.clone().unwrap_or_else(|| {
            DEFAULT_API_BASE.to_string()
        });

        let formatted_messages: Vec<serde_json::Value> = messages
            .iter()
            .map(|msg| {
                json!({
                    "role": msg.role,
                    "content": msg.content
                })
            })
            .collect();

        let request_payload = json!({
            "model": self.config.model,
            "temperature": 0.2,
            "messages": formatted_messages,
        });

        tracing::debug!("Making API call to {}/chat/completions", api_base);

        let response = self.client
            .post(format!("{}/chat/completions", api_base))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request_payload)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;
        if !status.is_success() {
            tracing::error!("Enrichment API HTTP {}: {}", status, response_text);
            return Err(anyhow::anyhow!("Enrichment API HTTP {}: {}", status, response_text));
        }

        let data = match serde_json::from_str::<serde_json::Value>(&response_text) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to parse API response as JSON: {:?}", e);
                return Err(anyhow::anyhow!("API returned non-JSON response: {}", e));
            }
        };

        if let Some(error) = data.get("error") {
            let error_message = error.get("message").and_then(|m| m.as_str()).unwrap_or("Unknown error");
            return Err(anyhow::anyhow!("API error: {}", error_message));
        }

        let choices = data.get("choices").and_then(|c| c.as_array())
            .ok_or_else(|| anyhow::anyhow!("Response missing 'choices' array"))?;

        if choices.is_empty() {
            return Err(anyhow::anyhow!("No completions returned"));
        }

        let message = choices[0].get("message")
            .ok_or_else(|| anyhow::anyhow!("Response choice missing 'message'"))?;

        let content = message.get("content").and_then(|c| c.as_str())
            .ok_or_else(|| anyhow::anyhow!("Response message missing 'content'"))?
            .to_string();

        if content.is_empty() {
            return Err(anyhow::anyhow!("Model returned empty content"));
        }

        Ok(content)
    }
}
