//! feedbackd-server/src/server.rs
//!
//! Router construction and the serve loop.

use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio::signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use feedbackd_common::Error;

use crate::config::Config;
use crate::context::{AppState, ServerContext};
use crate::routes::feedback::{list_submissions, retry, submit_review};
use crate::routes::health::health;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health))
        .route("/api/submit-review", post(submit_review))
        .route("/api/submissions", get(list_submissions))
        .route("/api/retry/{submission_id}", post(retry))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
        .with_state(state)
}

pub async fn run_server(server_addr: &str, database_url: &str, config: Config) -> Result<(), Error> {
    let ctx = ServerContext::new(database_url, config).await?;
    let app = build_router(ctx.app_state.clone());

    info!("Binding to {server_addr}");
    let listener = TcpListener::bind(server_addr).await?;
    info!("Server running on {server_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
