use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use caller_gateway::api::routes;
use caller_gateway::{AppState, GatewayConfig};

#[derive(Parser)]
#[command(name = "caller-gateway", about = "Universal caller gateway")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let cfg = GatewayConfig::load(cli.config.as_deref())?;
    let addr = cfg.server.bind_addr;

    let state = AppState::from_config(&cfg);
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Caller gateway listening");
    axum::serve(listener, app).await?;

    Ok(())
}
