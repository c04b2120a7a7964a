use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use product_catalog_api::{app, cli::Cli, config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load .env (or --env-file) before the config singleton reads the environment.
    match &cli.env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("failed to load env file {}", path.display()))?;
        }
        None => {
            let _ = dotenvy::dotenv();
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = cli.apply(config::config().clone());
    tracing::info!("Starting Product Catalog API in {:?} mode", config.environment);
    if config.security.api_key.is_none() {
        tracing::warn!("API_KEY is not set; every /api/products request will be rejected");
    }

    let bind_addr = config.bind_addr();
    let state = AppState::from_config(config);
    let router = app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Product Catalog API listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
