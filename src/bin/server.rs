//! Status server binary

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zkstat::{Config, Server, StatusService};

#[derive(Parser)]
#[command(name = "zkstat-server")]
#[command(about = "ZooKeeper ensemble status server for ClickHouse clusters")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Configuration file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Bind address for HTTP, overrides the config file
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, bind } => {
            let mut config = Config::load(config.as_deref())?;
            if let Some(bind) = bind {
                config.server.bind_addr = bind;
            }

            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| config.server.log_level.as_str().into()),
                )
                .with(tracing_subscriber::fmt::layer())
                .init();

            let service = StatusService::from_config(&config)?;
            Server::new(config.server).serve(Arc::new(service)).await?;
        }
    }

    Ok(())
}
