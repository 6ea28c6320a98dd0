use std::sync::Arc;

use feedbackd_ai::EnrichmentClient;
use feedbackd_common::models::submission::{AiStatus, SubmissionUpdate};

const FALLBACK_RESPONSE: &str = "Thanks for your feedback. Our team will review it shortly.";
const FALLBACK_SUMMARY: &str = "(LLM failed)";

/// Mediates between raw submission input, the remote enrichment call, and a
/// safe-to-persist result.
pub struct FeedbackService {
    enrichment: Arc<EnrichmentClient>,
}

impl FeedbackService {
    pub fn new(enrichment: Arc<EnrichmentClient>) -> Self {
        Self { enrichment }
    }

    /// Run enrichment and return (store update, user-facing response text).
    ///
    /// Never fails: any enrichment error is folded into a `Failed`-status
    /// update and a generic user response. Callers can only tell the two
    /// outcomes apart through `ai_status`.
    pub async fn enrich(&self, rating: i32, review_text: &str) -> (SubmissionUpdate, String) {
        match self.enrichment.generate(rating, review_text).await {
            Ok(result) => {
                let user_response = result.user_response.clone();
                let update = SubmissionUpdate {
                    ai_response: result.user_response,
                    ai_summary: result.summary,
                    ai_actions: result.actions,
                    ai_status: AiStatus::Success,
                };
                (update, user_response)
            }
            Err(e) => {
                tracing::warn!("Enrichment failed, storing fallback result: {:?}", e);
                let update = SubmissionUpdate {
                    ai_response: FALLBACK_RESPONSE.to_string(),
                    ai_summary: FALLBACK_SUMMARY.to_string(),
                    ai_actions: vec!["Review manually".to_string()],
                    ai_status: AiStatus::Failed,
                };
                (update, FALLBACK_RESPONSE.to_string())
            }
        }
    }
}
