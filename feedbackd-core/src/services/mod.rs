
// File: src/services/mod.rs

pub mod feedback_service;

pub use feedback_service::FeedbackService;
