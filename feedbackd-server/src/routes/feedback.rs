// feedbackd-server/src/routes/feedback.rs

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use feedbackd_common::models::submission::{AiStatus, Submission};

use crate::context::AppState;
use crate::error::ApiError;

const DEFAULT_LIST_LIMIT: i64 = 50;
const MAX_LIST_LIMIT: i64 = 200;

/// Shown to the caller when the enriched row could not be written back. The
/// row stays `pending` in that case; retry is the remedy.
const STORE_UPDATE_FALLBACK: &str = "Thanks for your feedback. Our team will review it shortly.";

#[derive(Debug, Deserialize)]
pub struct SubmitReviewRequest {
    /// Accepted for API compatibility; not persisted.
    pub user_id: Option<String>,
    pub rating: i32,
    #[serde(default)]
    pub review: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitReviewResponse {
    pub submission_id: Uuid,
    pub status: &'static str,
    pub ai_response: String,
}

#[derive(Debug, Serialize)]
pub struct SubmissionItem {
    pub id: Uuid,
    pub rating: i32,
    pub review_text: String,
    pub ai_summary: String,
    pub ai_actions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub ai_status: AiStatus,
}

impl From<Submission> for SubmissionItem {
    fn from(s: Submission) -> Self {
        Self {
            id: s.submission_id,
            rating: s.rating,
            review_text: s.review_text,
            ai_summary: s.ai_summary.unwrap_or_default(),
            ai_actions: s.ai_actions,
            created_at: s.created_at,
            ai_status: s.ai_status,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub since: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct RetryResponse {
    pub submission_id: Uuid,
    pub ai_status: AiStatus,
    pub ai_summary: String,
    pub ai_actions: Vec<String>,
}

/// POST /api/submit-review
///
/// Creates the pending row, runs enrichment on the request path, then folds
/// the result into the row. A failed write-back is deliberately not an
/// error for the caller: they still get a usable response and the row stays
/// `pending` until an operator retries it.
pub async fn submit_review(
    State(state): State<AppState>,
    Json(payload): Json<SubmitReviewRequest>,
) -> Result<Json<SubmitReviewResponse>, ApiError> {
    if !(1..=5).contains(&payload.rating) {
        return Err(ApiError::validation("rating must be between 1 and 5"));
    }

    let review = payload.review.trim().to_string();
    if review.chars().count() > state.config.max_review_chars {
        return Err(ApiError::validation(format!(
            "review must be at most {} characters",
            state.config.max_review_chars
        )));
    }
    if review.is_empty() && !state.config.allow_empty_review {
        return Err(ApiError::validation("review must not be empty"));
    }

    let submission = state
        .submissions
        .create(payload.rating, &review)
        .await
        .map_err(|e| ApiError::store_error(&e))?;

    let (update, mut user_response) = state.feedback.enrich(payload.rating, &review).await;

    if let Err(e) = state
        .submissions
        .apply_enrichment(submission.submission_id, &update)
        .await
    {
        // Row stays pending; caller still gets a safe response.
        warn!(
            "Failed to store enrichment for {}: {:?}",
            submission.submission_id, e
        );
        user_response = STORE_UPDATE_FALLBACK.to_string();
    }

    Ok(Json(SubmitReviewResponse {
        submission_id: submission.submission_id,
        status: "accepted",
        ai_response: user_response,
    }))
}

/// GET /api/submissions?limit=..&since=..
pub async fn list_submissions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<SubmissionItem>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    if !(1..=MAX_LIST_LIMIT).contains(&limit) {
        return Err(ApiError::validation(format!(
            "limit must be between 1 and {}",
            MAX_LIST_LIMIT
        )));
    }

    let rows = state
        .submissions
        .list_recent(limit, query.since)
        .await
        .map_err(|e| ApiError::store_error(&e))?;

    Ok(Json(rows.into_iter().map(SubmissionItem::from).collect()))
}

/// POST /api/retry/{submission_id}
///
/// Re-enriches the stored rating/review. Unlike submit, a failed write-back
/// is surfaced to the caller: retry is an operator action that wants to see
/// why the row did not converge.
pub async fn retry(
    State(state): State<AppState>,
    Path(submission_id): Path<Uuid>,
) -> Result<Json<RetryResponse>, ApiError> {
    let submission = state
        .submissions
        .get(submission_id)
        .await
        .map_err(|e| ApiError::store_error(&e))?
        .ok_or_else(|| ApiError::not_found("Submission not found"))?;

    let (update, _user_response) = state
        .feedback
        .enrich(submission.rating, &submission.review_text)
        .await;

    if let Err(e) = state
        .submissions
        .apply_enrichment(submission_id, &update)
        .await
    {
        return Ok(Json(RetryResponse {
            submission_id,
            ai_status: AiStatus::Failed,
            ai_summary: "(store update failed)".to_string(),
            ai_actions: vec![e.to_string()],
        }));
    }

    Ok(Json(RetryResponse {
        submission_id,
        ai_status: update.ai_status,
        ai_summary: update.ai_summary,
        ai_actions: update.ai_actions,
    }))
}
