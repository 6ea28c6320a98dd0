// feedbackd-server/src/lib.rs

pub mod config;
pub mod context;
pub mod error;
pub mod routes;
pub mod server;

pub use config::Config;
pub use context::{AppState, ServerContext};
