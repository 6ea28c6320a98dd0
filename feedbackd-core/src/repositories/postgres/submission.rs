// src/repositories/postgres/submission.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use feedbackd_common::models::submission::{Submission, SubmissionUpdate};
use feedbackd_common::traits::repository_traits::SubmissionRepository;
use crate::Error;

pub struct PostgresSubmissionRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresSubmissionRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn row_to_submission(r: &sqlx::postgres::PgRow) -> Result<Submission, Error> {
    let status: String = r.try_get("ai_status")?;
    Ok(Submission {
        submission_id: r.try_get("submission_id")?,
        rating: r.try_get("rating")?,
        review_text: r.try_get("review_text")?,
        ai_response: r.try_get("ai_response")?,
        ai_summary: r.try_get("ai_summary")?,
        ai_actions: r.try_get("ai_actions")?,
        ai_status: status.into(),
        created_at: r.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

#[async_trait]
impl SubmissionRepository for PostgresSubmissionRepository {
    async fn create(&self, rating: i32, review_text: &str) -> Result<Submission, Error> {
        // The store assigns submission_id and created_at:
        let row = sqlx::query(
            r#"
            INSERT INTO submissions (rating, review_text, ai_status)
            VALUES ($1, $2, 'pending')
            RETURNING submission_id,
                      rating,
                      review_text,
                      ai_response,
                      ai_summary,
                      ai_actions,
                      ai_status,
                      created_at
            "#,
        )
            .bind(rating)
            .bind(review_text)
            .fetch_one(&self.pool)
            .await?;

        row_to_submission(&row)
    }

    async fn apply_enrichment(
        &self,
        submission_id: Uuid,
        update: &SubmissionUpdate,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE submissions
            SET ai_response = $1,
                ai_summary = $2,
                ai_actions = $3,
                ai_status = $4
            WHERE submission_id = $5
            "#,
        )
            .bind(&update.ai_response)
            .bind(&update.ai_summary)
            .bind(&update.ai_actions)
            .bind(update.ai_status.to_string())
            .bind(submission_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get(&self, submission_id: Uuid) -> Result<Option<Submission>, Error> {
        let row = sqlx::query(
            r#"
            SELECT submission_id,
                   rating,
                   review_text,
                   ai_response,
                   ai_summary,
                   ai_actions,
                   ai_status,
                   created_at
            FROM submissions
            WHERE submission_id = $1
            "#,
        )
            .bind(submission_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => Ok(Some(row_to_submission(&r)?)),
            None => Ok(None),
        }
    }

    async fn list_recent(
        &self,
        limit: i64,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Submission>, Error> {
        let rows = sqlx::query(
            r#"
            SELECT submission_id,
                   rating,
                   review_text,
                   ai_response,
                   ai_summary,
                   ai_actions,
                   ai_status,
                   created_at
            FROM submissions
            WHERE ($2::timestamptz IS NULL OR created_at >= $2)
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
            .bind(limit)
            .bind(since)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_submission).collect()
    }
}
