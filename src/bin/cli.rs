//! CLI for querying an ensemble directly

use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use zkstat::cluster::DEFAULT_STATUS_PORT;
use zkstat::zookeeper::HttpStatusClient;
use zkstat::{NodeAddress, NodeStatusAggregator};

#[derive(Parser)]
#[command(name = "zkstat")]
#[command(about = "ZooKeeper ensemble status CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the mntr status of every node
    Status {
        /// Nodes as host or host:port (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        nodes: Vec<String>,

        /// AdminServer port for nodes given without one
        #[arg(long, default_value_t = DEFAULT_STATUS_PORT)]
        port: u16,

        /// Nodes queried at once
        #[arg(long, default_value = "1")]
        concurrency: usize,

        /// Per-node timeout in milliseconds
        #[arg(long, default_value = "5000")]
        timeout_ms: u64,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Status {
            nodes,
            port,
            concurrency,
            timeout_ms,
            json,
        } => {
            let nodes = nodes
                .iter()
                .map(|n| NodeAddress::parse(n, port))
                .collect::<zkstat::Result<Vec<_>>>()?;

            let client = HttpStatusClient::new(Duration::from_millis(timeout_ms))?;
            let aggregator = NodeStatusAggregator::new(Arc::new(client), concurrency);
            let statuses = aggregator.get_statuses(&nodes).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&statuses)?);
                return Ok(());
            }

            println!(
                "{:<24} {:<10} {:<12} {:<24} {:>12} {:>14} {:>10}",
                "HOST", "VERSION", "STATE", "PEER STATE", "AVG LATENCY", "DATA SIZE", "ZNODES"
            );
            for s in &statuses {
                println!(
                    "{:<24} {:<10} {:<12} {:<24} {:>12.4} {:>14} {:>10}",
                    s.host,
                    s.version,
                    s.server_state,
                    s.peer_state,
                    s.avg_latency,
                    s.approximate_data_size,
                    s.znode_count
                );
            }
        }
    }

    Ok(())
}
