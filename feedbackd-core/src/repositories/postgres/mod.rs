// src/repositories/postgres/mod.rs

pub mod submission;

pub use submission::PostgresSubmissionRepository;
