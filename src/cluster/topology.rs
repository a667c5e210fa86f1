//! Cluster topology and ensemble node addressing

use serde::{Deserialize, Serialize};
use std::fmt;

/// Port of the ZooKeeper AdminServer when a cluster does not configure one
pub const DEFAULT_STATUS_PORT: u16 = 8080;

/// Client port of the ensemble, used by the coordination client
pub const DEFAULT_ZK_PORT: u16 = 2181;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replica {
    pub host_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shard {
    #[serde(default)]
    pub replicas: Vec<Replica>,
}

/// Shards in declared order, each with its replicas in declared order.
///
/// The order is the layout of every presented matrix and is never re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterTopology {
    shards: Vec<Shard>,
}

impl ClusterTopology {
    pub fn new(shards: Vec<Shard>) -> Self {
        Self { shards }
    }

    /// Build a topology from host names, one inner list per shard
    pub fn from_hosts<S: Into<String>>(shards: impl IntoIterator<Item = Vec<S>>) -> Self {
        Self::new(
            shards
                .into_iter()
                .map(|hosts| Shard {
                    replicas: hosts
                        .into_iter()
                        .map(|h| Replica {
                            host_name: h.into(),
                        })
                        .collect(),
                })
                .collect(),
        )
    }

    pub fn shards(&self) -> &[Shard] {
        &self.shards
    }

    pub fn is_empty(&self) -> bool {
        self.shards.is_empty()
    }
}

/// A node's diagnostic endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeAddress {
    pub host: String,
    pub port: u16,
}

impl NodeAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parse `host`, `host:port`, `[v6]` or `[v6]:port`, falling back to
    /// `default_port`. IPv6 hosts are stored without brackets.
    pub fn parse(s: &str, default_port: u16) -> crate::Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(crate::Error::InvalidConfig("empty node address".into()));
        }

        if let Some(rest) = s.strip_prefix('[') {
            let (host, tail) = rest.split_once(']').ok_or_else(|| invalid_address(s))?;
            if host.is_empty() {
                return Err(invalid_address(s));
            }
            return match tail {
                "" => Ok(Self::new(host, default_port)),
                _ => {
                    let port = tail.strip_prefix(':').ok_or_else(|| invalid_address(s))?;
                    Ok(Self::new(host, parse_port(s, port)?))
                }
            };
        }

        match s.rsplit_once(':') {
            // Bare IPv6 literals contain colons but no port
            Some((host, port)) if !host.contains(':') => {
                let port = parse_port(s, port)?;
                if host.is_empty() {
                    return Err(crate::Error::InvalidConfig(format!(
                        "missing host in node address: {}",
                        s
                    )));
                }
                Ok(Self::new(host, port))
            }
            _ => Ok(Self::new(s, default_port)),
        }
    }

    /// URL of the `mntr` command on the node's AdminServer
    pub fn mntr_url(&self) -> String {
        format!("http://{}/commands/mntr", self)
    }
}

fn parse_port(address: &str, port: &str) -> crate::Result<u16> {
    port.parse().map_err(|_| {
        crate::Error::InvalidConfig(format!("invalid port in node address: {}", address))
    })
}

fn invalid_address(address: &str) -> crate::Error {
    crate::Error::InvalidConfig(format!("invalid node address: {}", address))
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// One managed cluster: its ensemble and its shard/replica layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterConfig {
    pub name: String,

    /// Ensemble hosts, in configured order
    #[serde(default)]
    pub zk_nodes: Vec<String>,

    /// Client port of the ensemble
    #[serde(default = "default_zk_port")]
    pub zk_port: u16,

    /// AdminServer port, when it differs from the global default
    #[serde(default)]
    pub zk_status_port: Option<u16>,

    #[serde(default, rename = "shards")]
    pub topology: ClusterTopology,
}

fn default_zk_port() -> u16 {
    DEFAULT_ZK_PORT
}

impl ClusterConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            zk_nodes: Vec::new(),
            zk_port: DEFAULT_ZK_PORT,
            zk_status_port: None,
            topology: ClusterTopology::default(),
        }
    }

    /// Diagnostic endpoints of the ensemble, in configured order
    pub fn node_addresses(&self, default_port: u16) -> Vec<NodeAddress> {
        let port = self.zk_status_port.unwrap_or(default_port);
        self.zk_nodes
            .iter()
            .map(|host| NodeAddress::new(host.clone(), port))
            .collect()
    }
}
