use std::sync::Arc;
use std::time::Duration;

use crate::models::{ChatMessage, EnrichmentResult};
use crate::provider::ModelProvider;

const TRUNCATION_MARKER: &str = "\n\n[TRUNCATED]";
const MAX_ACTIONS: usize = 8;

const SYSTEM_PROMPT: &str = "You are an assistant for a business handling customer feedback. \
Return ONLY valid JSON with this schema: \
{\"user_response\":\"...\", \"summary\":\"...\", \"recommended_actions\":[\"...\", \"...\"]}. \
Rules: concise, no markdown.";

/// Shapes the prompt for one enrichment attempt, invokes the provider once,
/// and validates the structured reply.
///
/// Errors here stay inside the process: callers fold them into a failed
/// submission update rather than surfacing them.
pub struct EnrichmentClient {
    provider: Arc<dyn ModelProvider>,
    max_input_chars: usize,
    deadline: Duration,
}

impl EnrichmentClient {
    pub fn new(provider: Arc<dyn ModelProvider>, max_input_chars: usize, deadline: Duration) -> Self {
        Self { provider, max_input_chars, deadline }
    }

    /// Produce an `EnrichmentResult` for one submission.
    ///
    /// An empty (after trim) review short-circuits to a canned result with no
    /// provider call; there is no signal worth paying a model call for.
    /// Otherwise exactly one call is made, bounded by `deadline`.
    pub async fn generate(&self, rating: i32, review_text: &str) -> anyhow::Result<EnrichmentResult> {
        let review_text = review_text.trim();

        if review_text.is_empty() {
            return Ok(EnrichmentResult {
                user_response: "Thanks for your rating. If you add a short note, we can act on it faster.".to_string(),
                summary: "Empty review (no text provided).".to_string(),
                actions: vec![
                    "Ask user for brief details".to_string(),
                    "Log as low-information feedback".to_string(),
                ],
            });
        }

        let (truncated, was_truncated) = truncate(review_text, self.max_input_chars);
        if was_truncated {
            tracing::debug!("Review truncated to {} chars before enrichment", self.max_input_chars);
        }

        let messages = build_messages(rating, &truncated);

        let content = tokio::time::timeout(self.deadline, self.provider.chat(messages))
            .await
            .map_err(|_| anyhow::anyhow!("Enrichment call exceeded {:?} deadline", self.deadline))??;

        parse_result(&content)
    }
}

/// Cut `text` down to `max_chars` characters, marking the cut.
pub fn truncate(text: &str, max_chars: usize) -> (String, bool) {
    if text.chars().count() <= max_chars {
        return (text.to_string(), false);
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push_str(TRUNCATION_MARKER);
    (cut, true)
}

fn build_messages(rating: i32, review_text: &str) -> Vec<ChatMessage> {
    let user = format!(
        "Customer rating: {}/5\n\
         Customer review text:\n\
         {}\n\n\
         Task: (1) helpful user-facing response, (2) 1-2 sentence summary, (3) 3-6 recommended next actions.",
        rating, review_text
    );

    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user)]
}

/// Validate the model's reply against the required shape.
pub fn parse_result(content: &str) -> anyhow::Result<EnrichmentResult> {
    let parsed: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| anyhow::anyhow!("Model returned non-JSON content: {}", e))?;

    let user_response = parsed.get("user_response")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .trim()
        .to_string();
    let summary = parsed.get("summary")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .trim()
        .to_string();
    let actions = parsed.get("recommended_actions").and_then(|v| v.as_array());

    let actions = match actions {
        Some(list) if !list.is_empty() => list,
        _ => return Err(anyhow::anyhow!("Model JSON missing required fields")),
    };

    if user_response.is_empty() || summary.is_empty() {
        return Err(anyhow::anyhow!("Model JSON missing required fields"));
    }

    let actions: Vec<String> = actions
        .iter()
        .filter_map(|a| a.as_str())
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .take(MAX_ACTIONS)
        .collect();

    Ok(EnrichmentResult { user_response, summary, actions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use async_trait::async_trait;

    struct CountingProvider {
        calls: AtomicUsize,
        reply: anyhow::Result<String>,
    }

    impl CountingProvider {
        fn replying(reply: &str) -> Self {
            Self { calls: AtomicUsize::new(0), reply: Ok(reply.to_string()) }
        }

        fn failing(msg: &str) -> Self {
            Self { calls: AtomicUsize::new(0), reply: Err(anyhow::anyhow!("{}", msg.to_string())) }
        }
    }

    #[async_trait]
    impl ModelProvider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        async fn chat(&self, _messages: Vec<ChatMessage>) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(s) => Ok(s.clone()),
                Err(e) => Err(anyhow::anyhow!("{}", e)),
            }
        }
    }

    fn client_with(provider: Arc<CountingProvider>) -> EnrichmentClient {
        EnrichmentClient::new(provider, 2500, Duration::from_secs(30))
    }

    #[test]
    fn truncate_is_exact_at_the_limit() {
        let text = "x".repeat(3000);
        let (cut, was_cut) = truncate(&text, 2500);
        assert!(was_cut);
        assert_eq!(cut.chars().count(), 2500 + TRUNCATION_MARKER.chars().count());
        assert!(cut.ends_with(TRUNCATION_MARKER));
        assert_eq!(&cut[..4], "xxxx");
    }

    #[test]
    fn truncate_leaves_short_text_alone() {
        let (out, was_cut) = truncate("short review", 2500);
        assert!(!was_cut);
        assert_eq!(out, "short review");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        let text = "é".repeat(10);
        let (cut, was_cut) = truncate(&text, 4);
        assert!(was_cut);
        assert!(cut.starts_with("éééé"));
        assert!(cut.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn parse_accepts_a_conforming_reply() {
        let result = parse_result(
            r#"{"user_response":"Sorry about that.","summary":"Slow service.","recommended_actions":["Apologize","Staff up"]}"#,
        )
        .unwrap();
        assert_eq!(result.user_response, "Sorry about that.");
        assert_eq!(result.summary, "Slow service.");
        assert_eq!(result.actions, vec!["Apologize", "Staff up"]);
    }

    #[test]
    fn parse_rejects_missing_actions() {
        let err = parse_result(r#"{"user_response":"ok","summary":"fine"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn parse_rejects_empty_user_response() {
        let err = parse_result(r#"{"user_response":"  ","summary":"fine","recommended_actions":["a"]}"#);
        assert!(err.is_err());
    }

    #[test]
    fn parse_rejects_non_json() {
        assert!(parse_result("Sure! Here's the JSON you asked for:").is_err());
    }

    #[test]
    fn parse_trims_and_caps_actions() {
        let actions: Vec<String> = (0..12).map(|i| format!("\"  action {} \"", i)).collect();
        let content = format!(
            r#"{{"user_response":"r","summary":"s","recommended_actions":[{}, "   "]}}"#,
            actions.join(",")
        );
        let result = parse_result(&content).unwrap();
        assert_eq!(result.actions.len(), 8);
        assert!(result.actions.iter().all(|a| !a.trim().is_empty()));
        assert_eq!(result.actions[0], "action 0");
    }

    #[tokio::test]
    async fn empty_review_skips_the_provider() {
        let provider = Arc::new(CountingProvider::replying("unused"));
        let client = client_with(provider.clone());

        let result = client.generate(4, "   \n ").await.unwrap();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert_eq!(result.summary, "Empty review (no text provided).");
        assert!(result.user_response.contains("Thanks for your rating"));
        assert_eq!(result.actions.len(), 2);
    }

    #[tokio::test]
    async fn non_empty_review_calls_the_provider_once() {
        let provider = Arc::new(CountingProvider::replying(
            r#"{"user_response":"Thanks!","summary":"Happy customer.","recommended_actions":["Share with team"]}"#,
        ));
        let client = client_with(provider.clone());

        let result = client.generate(5, "Great food").await.unwrap();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.user_response, "Thanks!");
    }

    #[tokio::test]
    async fn provider_failure_propagates_as_err() {
        let provider = Arc::new(CountingProvider::failing("boom"));
        let client = client_with(provider);

        assert!(client.generate(1, "terrible").await.is_err());
    }
}
