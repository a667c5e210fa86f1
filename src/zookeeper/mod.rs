//! ZooKeeper ensemble status
//!
//! - `mntr` response parsing
//! - Per-node diagnostic queries
//! - Ensemble-wide aggregation
//! - Replicated table status presentation

pub mod aggregator;
pub mod client;
pub mod mntr;
pub mod replication;

pub use aggregator::NodeStatusAggregator;
pub use client::{HttpStatusClient, StatusClient};
pub use mntr::{parse_mntr, truncate_version, NodeStatus, VERSION_DELIMITER};
pub use replication::{
    build_presentation, ReplicatedTableStatusSource, ReplicationStatusMatrix,
    UnconfiguredTableStatus,
};
