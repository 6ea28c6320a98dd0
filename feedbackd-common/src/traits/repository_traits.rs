// File: feedbackd-common/src/traits/repository_traits.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::error::Error;
use crate::models::submission::{Submission, SubmissionUpdate};

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Insert a new pending row; the store assigns id and created_at.
    async fn create(&self, rating: i32, review_text: &str) -> Result<Submission, Error>;

    /// Fold one enrichment attempt's outcome into an existing row.
    async fn apply_enrichment(&self, submission_id: Uuid, update: &SubmissionUpdate) -> Result<(), Error>;

    async fn get(&self, submission_id: Uuid) -> Result<Option<Submission>, Error>;

    /// Newest-first, at most `limit` rows, optionally created_at >= since.
    async fn list_recent(
        &self,
        limit: i64,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Submission>, Error>;
}
