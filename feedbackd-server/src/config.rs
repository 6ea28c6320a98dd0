// feedbackd-server/src/config.rs

use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

use feedbackd_common::Error;

/// Runtime configuration read from the environment at startup (after
/// `dotenv` has been applied). Credentials and limits for the two remote
/// collaborators live here; nothing in it changes once the server is up.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_api_key: String,
    pub llm_api_base: Option<String>,
    pub llm_model: String,
    pub max_review_chars: usize,
    pub max_llm_input_chars: usize,
    pub allow_empty_review: bool,
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        Ok(Self {
            llm_api_key: require("LLM_API_KEY")?,
            llm_api_base: env::var("LLM_API_BASE").ok(),
            llm_model: try_load("LLM_MODEL", "llama3.1-8b"),
            max_review_chars: try_load("MAX_REVIEW_CHARS", "8000"),
            max_llm_input_chars: try_load("MAX_LLM_INPUT_CHARS", "2500"),
            allow_empty_review: try_load("ALLOW_EMPTY_REVIEW", "true"),
        })
    }
}

fn require(key: &str) -> Result<String, Error> {
    env::var(key).map_err(|_| Error::Validation(format!("Missing required env var: {}", key)))
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
