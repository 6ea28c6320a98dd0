// File: feedbackd-common/src/models/mod.rs
pub mod submission;

pub use submission::{AiStatus, Submission, SubmissionUpdate};
