mod api;
mod config;
mod error;
mod generator;
mod metrics;
mod models;
mod pagination;

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::api::{router, AppState};
use crate::config::{load_config, AppConfig, DEFAULT_LISTEN_IP, DEFAULT_PORT};

/// CLI arguments
#[derive(Parser)]
#[command(
    name = "pNode Dashboard",
    about = "Simulated pNode fleet analytics API"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// IP address to bind the server to
    #[arg(long)]
    listen_ip: Option<String>,

    /// Port to bind the server to
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Cli::parse();
    let mut config: AppConfig = load_config(&args.config)?;

    // CLI flags win over the config file
    if let Some(ip) = args.listen_ip {
        config.server.listen_ip = Some(ip);
    }
    if let Some(port) = args.port {
        config.server.port = Some(port);
    }

    let ip = config
        .server
        .listen_ip
        .clone()
        .unwrap_or_else(|| DEFAULT_LISTEN_IP.to_string());
    let port = config.server.port.unwrap_or(DEFAULT_PORT);
    let addr: SocketAddr = format!("{}:{}", ip, port).parse()?;

    tracing::info!(
        network = config.fleet.network(),
        roster_size = config.fleet.roster_size(),
        "serving simulated fleet data"
    );

    let app = router(AppState::new(config.fleet));

    tracing::info!("server running on http://{}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
