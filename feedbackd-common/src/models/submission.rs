// File: feedbackd-common/src/models/submission.rs

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Add sqlx::Type so that SQLx knows how to decode this enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AiStatus {
    Pending,
    Success,
    Failed,
}

impl fmt::Display for AiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiStatus::Pending => write!(f, "pending"),
            AiStatus::Success => write!(f, "success"),
            AiStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for AiStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(AiStatus::Pending),
            "success" => Ok(AiStatus::Success),
            "failed" => Ok(AiStatus::Failed),
            _ => Err(format!("Unknown ai_status: {}", s)),
        }
    }
}

impl From<String> for AiStatus {
    fn from(s: String) -> Self {
        // Rows written before enrichment ran carry no status yet.
        s.parse().unwrap_or(AiStatus::Pending)
    }
}

/// One rating+review record plus its enrichment outcome.
///
/// `submission_id` and `created_at` are assigned by the store; `rating` and
/// `review_text` never change after creation.
#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct Submission {
    pub submission_id: Uuid,
    pub rating: i32,
    pub review_text: String,
    pub ai_response: Option<String>,
    pub ai_summary: Option<String>,
    pub ai_actions: Vec<String>,
    pub ai_status: AiStatus,
    pub created_at: DateTime<Utc>,
}

/// Candidate update produced by one enrichment attempt. Folded into the
/// stored row; never held past the request that produced it.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubmissionUpdate {
    pub ai_response: String,
    pub ai_summary: String,
    pub ai_actions: Vec<String>,
    pub ai_status: AiStatus,
}
