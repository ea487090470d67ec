//! catalog-sync binary: webhook server bridging a commerce backend and a
//! headless content store.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use catalog_sync::api::ApiServer;
use catalog_sync::clients::{CommerceClient, ContentStoreClient};
use catalog_sync::config::SyncConfig;
use catalog_sync::sync::SyncHandler;

#[derive(Parser)]
#[command(name = "catalog-sync", version, about = "Sync products from a commerce backend to a headless content store")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the webhook server.
    Serve {
        /// Path to a TOML config file; the environment is used when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the bind host.
        #[arg(long)]
        host: Option<String>,
        /// Override the bind port.
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, host, port } => {
            let mut config = match config {
                Some(path) => SyncConfig::load(path)?,
                None => SyncConfig::from_env(),
            };
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            let commerce = Arc::new(CommerceClient::from_config(&config));
            let content_store = Arc::new(ContentStoreClient::from_config(&config));
            let handler = Arc::new(
                SyncHandler::new(commerce, content_store)
                    .with_threshold_ms(config.sync_threshold_ms),
            );

            ApiServer::new(config, handler).run().await
        }
    }
}
