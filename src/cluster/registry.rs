//! Cluster lookup by name

use crate::cluster::ClusterConfig;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Read-only view of the managed clusters
pub trait ClusterRegistry: Send + Sync {
    /// Configuration of the named cluster, if it exists
    fn get(&self, name: &str) -> Option<ClusterConfig>;

    /// Names of all clusters, sorted
    fn names(&self) -> Vec<String>;
}

/// In-memory registry seeded from configuration
#[derive(Default)]
pub struct ClusterStore {
    clusters: RwLock<HashMap<String, ClusterConfig>>,
}

impl ClusterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_configs(clusters: impl IntoIterator<Item = ClusterConfig>) -> Self {
        let store = Self::new();
        for cluster in clusters {
            store.insert(cluster);
        }
        store
    }

    /// Add or replace a cluster, returning the previous entry
    pub fn insert(&self, cluster: ClusterConfig) -> Option<ClusterConfig> {
        self.clusters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(cluster.name.clone(), cluster)
    }

    pub fn remove(&self, name: &str) -> Option<ClusterConfig> {
        self.clusters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    pub fn len(&self) -> usize {
        self.clusters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ClusterRegistry for ClusterStore {
    fn get(&self, name: &str) -> Option<ClusterConfig> {
        self.clusters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .clusters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let store = ClusterStore::from_configs(vec![
            ClusterConfig::new("test"),
            ClusterConfig::new("abc"),
        ]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("test").unwrap().name, "test");
        assert!(store.get("missing").is_none());
        assert_eq!(store.names(), vec!["abc", "test"]);
    }

    #[test]
    fn test_insert_replaces_and_remove() {
        let store = ClusterStore::new();
        assert!(store.is_empty());

        let mut cluster = ClusterConfig::new("test");
        assert!(store.insert(cluster.clone()).is_none());

        cluster.zk_nodes = vec!["zk1".into()];
        let previous = store.insert(cluster).unwrap();
        assert!(previous.zk_nodes.is_empty());
        assert_eq!(store.get("test").unwrap().zk_nodes, vec!["zk1"]);

        assert!(store.remove("test").is_some());
        assert!(store.get("test").is_none());
    }
}
