//! Replicated table status, laid out by shard and replica

use crate::cluster::{ClusterConfig, ClusterTopology};
use crate::common::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Table status paired with the host grid it is laid out against.
///
/// `header[shard][replica]` is the replica's host name. `tables` is passed
/// through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationStatusMatrix<T = Value> {
    pub header: Vec<Vec<String>>,
    pub tables: T,
}

/// Derive the header from `topology` and attach `tables`.
pub fn build_presentation<T>(topology: &ClusterTopology, tables: T) -> ReplicationStatusMatrix<T> {
    let header = topology
        .shards()
        .iter()
        .map(|shard| {
            shard
                .replicas
                .iter()
                .map(|replica| replica.host_name.clone())
                .collect()
        })
        .collect();
    ReplicationStatusMatrix { header, tables }
}

/// Computes per-table replication status from the coordination service
#[async_trait]
pub trait ReplicatedTableStatusSource: Send + Sync {
    async fn replicated_table_status(&self, cluster: &ClusterConfig) -> Result<Value>;
}

/// Source used when no coordination client is wired in
pub struct UnconfiguredTableStatus;

#[async_trait]
impl ReplicatedTableStatusSource for UnconfiguredTableStatus {
    async fn replicated_table_status(&self, cluster: &ClusterConfig) -> Result<Value> {
        Err(Error::UpstreamServiceFailure {
            cluster: cluster.name.clone(),
            reason: "no coordination client configured".into(),
        })
    }
}
