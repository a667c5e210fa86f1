//! Parser for the `mntr` diagnostic response
//!
//! The AdminServer answers `/commands/mntr` with a JSON object; the legacy
//! four-letter-word interface answers with `zk_<key>\t<value>` lines. Both are
//! accepted. Keys lose their `zk_` prefix, unknown keys are ignored and
//! missing keys leave the field at its zero value. The version is the only
//! field that must be present: it is reported as `<semver>--<build metadata>`
//! and only the part before the delimiter is kept.

use crate::cluster::NodeAddress;
use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Separates the release version from build metadata in `version`
pub const VERSION_DELIMITER: &str = "--";

/// Status of one ensemble node, as reported by `mntr`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeStatus {
    pub host: String,
    pub version: String,
    /// `leader`, `follower`, `observer` or `standalone`
    pub server_state: String,
    pub peer_state: String,
    /// Milliseconds
    pub avg_latency: f64,
    /// Bytes
    pub approximate_data_size: u64,
    pub znode_count: u64,
}

/// Decode a raw `mntr` body from `node` into a [`NodeStatus`].
pub fn parse_mntr(node: &NodeAddress, body: &[u8]) -> Result<NodeStatus> {
    let text = std::str::from_utf8(body)
        .map_err(|e| malformed(node, format!("body is not valid UTF-8: {}", e)))?;

    let fields = if text.trim_start().starts_with('{') {
        json_fields(node, text)?
    } else {
        line_fields(text)
    };

    let mut status = NodeStatus {
        host: node.host.clone(),
        ..Default::default()
    };
    let mut raw_version = None;

    for (key, value) in fields {
        match key.strip_prefix("zk_").unwrap_or(key.as_str()) {
            "version" => raw_version = Some(as_text(value)),
            "server_state" => status.server_state = as_text(value),
            "peer_state" => status.peer_state = as_text(value),
            "avg_latency" => status.avg_latency = as_f64(node, "avg_latency", &value)?,
            "approximate_data_size" => {
                status.approximate_data_size = as_u64(node, "approximate_data_size", &value)?
            }
            "znode_count" => status.znode_count = as_u64(node, "znode_count", &value)?,
            _ => {}
        }
    }

    let raw_version =
        raw_version.ok_or_else(|| malformed(node, "missing version field".to_string()))?;
    status.version = truncate_version(node, &raw_version)?;
    Ok(status)
}

/// Keep the part of a reported version before [`VERSION_DELIMITER`].
pub fn truncate_version(node: &NodeAddress, raw: &str) -> Result<String> {
    let Some(end) = raw.find(VERSION_DELIMITER) else {
        return Err(malformed(
            node,
            format!(
                "version {:?} has no {:?} build metadata delimiter",
                raw, VERSION_DELIMITER
            ),
        ));
    };
    let version = raw[..end].trim();
    if version.is_empty() {
        return Err(malformed(node, format!("version {:?} is empty", raw)));
    }
    Ok(version.to_string())
}

fn json_fields(node: &NodeAddress, text: &str) -> Result<Vec<(String, Value)>> {
    let object: serde_json::Map<String, Value> = serde_json::from_str(text)
        .map_err(|e| malformed(node, format!("invalid JSON body: {}", e)))?;
    Ok(object.into_iter().collect())
}

fn line_fields(text: &str) -> Vec<(String, Value)> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(char::is_whitespace) {
            Some((key, value)) => (key.to_string(), Value::String(value.trim().to_string())),
            None => (line.to_string(), Value::String(String::new())),
        })
        .collect()
}

fn as_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn as_f64(node: &NodeAddress, key: &str, value: &Value) -> Result<f64> {
    match value {
        Value::Null => Ok(0.0),
        Value::Number(n) => n.as_f64().ok_or_else(|| not_numeric(node, key, value)),
        Value::String(s) if s.is_empty() => Ok(0.0),
        Value::String(s) => s.parse().map_err(|_| not_numeric(node, key, value)),
        _ => Err(not_numeric(node, key, value)),
    }
}

fn as_u64(node: &NodeAddress, key: &str, value: &Value) -> Result<u64> {
    match value {
        Value::Null => Ok(0),
        Value::Number(n) => n.as_u64().ok_or_else(|| not_numeric(node, key, value)),
        Value::String(s) if s.is_empty() => Ok(0),
        Value::String(s) => s.parse().map_err(|_| not_numeric(node, key, value)),
        _ => Err(not_numeric(node, key, value)),
    }
}

fn not_numeric(node: &NodeAddress, key: &str, value: &Value) -> Error {
    malformed(node, format!("{} is not a valid number: {}", key, value))
}

fn malformed(node: &NodeAddress, reason: String) -> Error {
    Error::MalformedStatusResponse {
        host: node.to_string(),
        reason,
    }
}
