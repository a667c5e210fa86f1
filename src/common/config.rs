//! Configuration for zkstat
//!
//! Values come from an optional TOML file, then `ZKSTAT_*` environment
//! variables (nested keys separated by `__`, e.g. `ZKSTAT_SERVER__BIND_ADDR`).

use crate::cluster::{ClusterConfig, DEFAULT_STATUS_PORT};
use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

const ENV_PREFIX: &str = "ZKSTAT";

/// Global configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub zookeeper: ZookeeperConfig,

    /// Managed clusters, looked up by name
    #[serde(default)]
    pub clusters: Vec<ClusterConfig>,
}

/// HTTP API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for HTTP API
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,

    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8808))
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            log_level: default_log_level(),
        }
    }
}

/// Settings for querying ensemble diagnostic endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZookeeperConfig {
    /// AdminServer port used when a cluster does not set its own
    #[serde(default = "default_status_port")]
    pub status_port: u16,

    /// Per-node request timeout
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Node queries in flight per request (1 = sequential)
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_status_port() -> u16 {
    DEFAULT_STATUS_PORT
}
fn default_request_timeout() -> u64 {
    5_000
}
fn default_max_concurrency() -> usize {
    1
}

impl Default for ZookeeperConfig {
    fn default() -> Self {
        Self {
            status_port: default_status_port(),
            request_timeout_ms: default_request_timeout(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

impl ZookeeperConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Config {
    /// Load configuration from an optional file plus the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let config: Config = builder
            .add_source(env_source())
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text, without consulting the environment.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.zookeeper.max_concurrency == 0 {
            return Err(Error::InvalidConfig(
                "zookeeper.max_concurrency must be at least 1".into(),
            ));
        }

        let mut seen = HashSet::new();
        for cluster in &self.clusters {
            if cluster.name.trim().is_empty() {
                return Err(Error::InvalidConfig("cluster name must not be empty".into()));
            }
            if !seen.insert(cluster.name.as_str()) {
                return Err(Error::InvalidConfig(format!(
                    "duplicate cluster name: {}",
                    cluster.name
                )));
            }
        }
        Ok(())
    }
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
