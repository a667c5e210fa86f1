//! # zkstat
//!
//! Health and replication status for the ZooKeeper ensembles that back
//! ClickHouse clusters:
//! - Live `mntr` status of every ensemble node, all-or-nothing
//! - Replicated table status laid out by shard and replica
//!
//! ## Architecture
//!
//! ```text
//!   GET /api/v1/zk/status/{cluster}
//!   GET /api/v1/zk/replicated-table-status/{cluster}
//!             │
//! ┌───────────▼─────────────┐      ┌──────────────────────┐
//! │      StatusService      │─────▶│   ClusterRegistry    │
//! │  (lookup + pipelines)   │      │ (name → topology)    │
//! └─────┬─────────────┬─────┘      └──────────────────────┘
//!       │             │
//! ┌─────▼──────┐ ┌────▼──────────────────────┐
//! │ Aggregator │ │ ReplicatedTableStatus     │
//! │ (fan-out)  │ │ source + presenter        │
//! └─────┬──────┘ └───────────────────────────┘
//!       │ HTTP  /commands/mntr
//!  ┌────▼───┐ ┌────────┐ ┌────────┐
//!  │  zk1   │ │  zk2   │ │  zk3   │
//!  └────────┘ └────────┘ └────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! zkstat-server serve --config ./zkstat.toml --bind 0.0.0.0:8808
//!
//! # Query an ensemble directly
//! zkstat status --nodes zk1,zk2,zk3 --port 8080
//! ```

pub mod cluster;
pub mod common;
pub mod server;
pub mod service;
pub mod zookeeper;

// Re-export commonly used types
pub use cluster::{ClusterConfig, ClusterTopology, NodeAddress};
pub use common::{Config, Error, Result};
pub use server::Server;
pub use service::StatusService;
pub use zookeeper::{NodeStatus, NodeStatusAggregator, ReplicationStatusMatrix};

/// Current version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
