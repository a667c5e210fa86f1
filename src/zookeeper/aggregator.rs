//! Ensemble-wide status collection
//!
//! Every node is queried once, with no retry. The result is all-or-nothing:
//! the first failing node (in input order) fails the whole aggregation and
//! queries still in flight are dropped.

use crate::cluster::NodeAddress;
use crate::common::Result;
use crate::zookeeper::client::StatusClient;
use crate::zookeeper::mntr::{parse_mntr, NodeStatus};
use futures_util::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;

pub struct NodeStatusAggregator {
    client: Arc<dyn StatusClient>,
    max_concurrency: usize,
}

impl NodeStatusAggregator {
    /// `max_concurrency` of 1 queries nodes one after another.
    pub fn new(client: Arc<dyn StatusClient>, max_concurrency: usize) -> Self {
        Self {
            client,
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Status of every node, in the order given.
    ///
    /// `buffered` yields results in input order, so the error returned is the
    /// one of the earliest failing node whether queries overlap or not.
    pub async fn get_statuses(&self, nodes: &[NodeAddress]) -> Result<Vec<NodeStatus>> {
        // Collected up front so the resulting future is `Send` for any borrow of `nodes`
        let queries: Vec<_> = nodes.iter().map(|node| self.query(node)).collect();
        stream::iter(queries)
            .buffered(self.max_concurrency)
            .try_collect()
            .await
    }

    async fn query(&self, node: &NodeAddress) -> Result<NodeStatus> {
        tracing::debug!(node = %node, "Querying mntr");
        let body = self.client.fetch_mntr(node).await.inspect_err(|e| {
            tracing::warn!(node = %node, error = %e, "Status query failed");
        })?;
        parse_mntr(node, &body)
    }
}
