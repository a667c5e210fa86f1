//! Cluster status service
//!
//! Resolves a cluster name and runs the matching pipeline. Nothing is cached
//! between calls: topology and node statuses are read fresh every time.

use crate::cluster::{ClusterConfig, ClusterRegistry, ClusterStore};
use crate::common::{Config, Error, Result};
use crate::zookeeper::{
    build_presentation, HttpStatusClient, NodeStatus, NodeStatusAggregator,
    ReplicatedTableStatusSource, ReplicationStatusMatrix, UnconfiguredTableStatus,
};
use std::sync::Arc;

pub struct StatusService {
    registry: Arc<dyn ClusterRegistry>,
    aggregator: NodeStatusAggregator,
    tables: Arc<dyn ReplicatedTableStatusSource>,
    default_status_port: u16,
}

impl StatusService {
    pub fn new(
        registry: Arc<dyn ClusterRegistry>,
        aggregator: NodeStatusAggregator,
        tables: Arc<dyn ReplicatedTableStatusSource>,
        default_status_port: u16,
    ) -> Self {
        Self {
            registry,
            aggregator,
            tables,
            default_status_port,
        }
    }

    /// Wire the service from configuration: clusters from the config file,
    /// HTTP diagnostic queries, and no coordination client.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = HttpStatusClient::new(config.zookeeper.request_timeout())?;
        Ok(Self::new(
            Arc::new(ClusterStore::from_configs(config.clusters.clone())),
            NodeStatusAggregator::new(Arc::new(client), config.zookeeper.max_concurrency),
            Arc::new(UnconfiguredTableStatus),
            config.zookeeper.status_port,
        ))
    }

    /// Replace the replicated table status source
    pub fn with_table_status(mut self, tables: Arc<dyn ReplicatedTableStatusSource>) -> Self {
        self.tables = tables;
        self
    }

    pub fn cluster_names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Status of every ensemble node of `cluster_name`, in configured order
    pub async fn node_statuses(&self, cluster_name: &str) -> Result<Vec<NodeStatus>> {
        let cluster = self.lookup(cluster_name)?;
        let nodes = cluster.node_addresses(self.default_status_port);
        tracing::info!(cluster = %cluster_name, nodes = nodes.len(), "Collecting ensemble status");
        self.aggregator.get_statuses(&nodes).await
    }

    /// Replicated table status of `cluster_name`, laid out by shard and replica
    pub async fn replicated_table_status(
        &self,
        cluster_name: &str,
    ) -> Result<ReplicationStatusMatrix> {
        let cluster = self.lookup(cluster_name)?;
        let tables = self
            .tables
            .replicated_table_status(&cluster)
            .await
            .map_err(|e| match e {
                Error::UpstreamServiceFailure { .. } => e,
                other => Error::UpstreamServiceFailure {
                    cluster: cluster.name.clone(),
                    reason: other.to_string(),
                },
            })?;
        Ok(build_presentation(&cluster.topology, tables))
    }

    fn lookup(&self, cluster_name: &str) -> Result<ClusterConfig> {
        self.registry
            .get(cluster_name)
            .ok_or_else(|| Error::ClusterNotFound(cluster_name.to_string()))
    }
}
