mod api;
mod app_config;
mod cli;
mod error;
mod middleware;
mod pipeline;
mod rate_limit;
mod router;
mod state;

use std::net::SocketAddr;

use clap::Parser;
use tracing::info;

use briefly_core::Config;

use crate::cli::{Cli, Command};

fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

async fn serve(config: Config) -> anyhow::Result<()> {
    config.log_summary();

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = app_config::build_state(config)?;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    info!("API docs at http://{}/docs", addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    briefly_core::config::load_dotenv();
    let cli = Cli::parse();
    let mut config = app_config::load_config(cli.profile.as_deref());
    init_tracing(&config.logging.level);

    match cli.command() {
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config.redacted_summary())?);
        }
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await?;
        }
    }

    Ok(())
}
