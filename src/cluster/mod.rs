//! Managed cluster model
//!
//! A cluster pairs a ZooKeeper ensemble with the shard/replica layout of the
//! ClickHouse cluster it backs.

pub mod registry;
pub mod topology;

pub use registry::{ClusterRegistry, ClusterStore};
pub use topology::{
    ClusterConfig, ClusterTopology, NodeAddress, Replica, Shard, DEFAULT_STATUS_PORT,
    DEFAULT_ZK_PORT,
};
