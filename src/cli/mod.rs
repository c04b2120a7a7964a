use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "product-catalog-api")]
#[command(about = "Product catalog REST API server")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Address to bind (overrides HOST)")]
    pub host: Option<String>,

    #[arg(short, long, help = "Port to listen on (overrides PORT / CATALOG_API_PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Load environment variables from this file instead of ./.env")]
    pub env_file: Option<PathBuf>,

    #[arg(long, help = "Start with an empty catalog instead of the demo products")]
    pub no_seed: bool,
}

impl Cli {
    /// Command-line values win over anything loaded from the environment.
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.no_seed {
            config.catalog.seed_demo_products = false;
        }
        config
    }
}
