//! feedbackd-server/src/context.rs
//!
//! Builds every long-lived collaborator once at startup and hands the
//! handlers an immutable, cloneable view of them.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use feedbackd_ai::{ChatCompletionsProvider, EnrichmentClient, ProviderConfig};
use feedbackd_core::db::Database;
use feedbackd_core::repositories::postgres::PostgresSubmissionRepository;
use feedbackd_core::services::FeedbackService;
use feedbackd_common::traits::repository_traits::SubmissionRepository;
use feedbackd_common::Error;

use crate::config::Config;

/// One enrichment attempt may not outlive this deadline.
const ENRICHMENT_DEADLINE: Duration = Duration::from_secs(30);

/// State shared by all request handlers. Everything inside is immutable
/// after construction; concurrent requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub submissions: Arc<dyn SubmissionRepository>,
    pub feedback: Arc<FeedbackService>,
    pub config: Arc<Config>,
}

pub struct ServerContext {
    pub db: Database,
    pub app_state: AppState,
}

impl ServerContext {
    pub async fn new(database_url: &str, config: Config) -> Result<Self, Error> {
        let db = Database::new(database_url).await?;
        db.migrate().await?;

        let submissions: Arc<dyn SubmissionRepository> =
            Arc::new(PostgresSubmissionRepository::new(db.pool().clone()));

        let provider = Arc::new(ChatCompletionsProvider::new(ProviderConfig {
            api_base: config.llm_api_base.clone(),
            api_key: config.llm_api_key.clone(),
            model: config.llm_model.clone(),
        }));
        let enrichment = Arc::new(EnrichmentClient::new(
            provider,
            config.max_llm_input_chars,
            ENRICHMENT_DEADLINE,
        ));
        let feedback = Arc::new(FeedbackService::new(enrichment));

        info!("Server context initialized (model={})", config.llm_model);

        Ok(Self {
            db,
            app_state: AppState {
                submissions,
                feedback,
                config: Arc::new(config),
            },
        })
    }
}
