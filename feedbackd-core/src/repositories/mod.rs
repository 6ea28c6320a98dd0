// src/repositories/mod.rs

pub mod postgres;

pub use postgres::submission::PostgresSubmissionRepository;
pub use feedbackd_common::traits::repository_traits::SubmissionRepository;
