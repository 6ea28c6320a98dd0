// feedbackd-server/src/main.rs

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use feedbackd_server::config::Config;
use feedbackd_server::server::run_server;

#[derive(Parser, Debug, Clone)]
#[command(name = "feedbackd")]
#[command(author, version, about = "Feedback intake backend with LLM enrichment")]
struct Args {
    /// Address to which the server will bind
    #[arg(long, default_value = "0.0.0.0:8080")]
    server_addr: String,

    /// Postgres connection URL (falls back to DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("feedbackd=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let database_url = args
        .database_url
        .clone()
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "postgres://feedbackd@localhost:5432/feedbackd".to_string());

    let config = Config::load()?;
    info!("feedbackd starting. addr={}", args.server_addr);

    if let Err(e) = run_server(&args.server_addr, &database_url, config).await {
        error!("Server error: {:?}", e);
        return Err(e.into());
    }

    Ok(())
}
