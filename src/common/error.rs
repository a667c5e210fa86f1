//! Error types for zkstat

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // === Lookup Errors ===
    #[error("cluster {0} does not exist")]
    ClusterNotFound(String),

    // === Node Errors ===
    #[error("get zookeeper node {host} status failed: {reason}")]
    NodeUnreachable { host: String, reason: String },

    #[error("get zookeeper node {host} status failed: {status}")]
    NodeErrorResponse { host: String, status: String },

    #[error("malformed status response from {host}: {reason}")]
    MalformedStatusResponse { host: String, reason: String },

    // === Coordination Client Errors ===
    #[error("replicated table status for cluster {cluster} failed: {reason}")]
    UpstreamServiceFailure { cluster: String, reason: String },

    // === Config Errors ===
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Envelope code for a successful response, mirroring the HTTP 200 it rides on.
pub const CODE_SUCCESS: u32 = 200;

impl Error {
    /// Envelope code reported to callers. Each failure category has its own code.
    pub fn code(&self) -> u32 {
        match self {
            Error::ClusterNotFound(_) => 5201,
            Error::NodeUnreachable { .. } => 5202,
            Error::NodeErrorResponse { .. } => 5203,
            Error::MalformedStatusResponse { .. } => 5204,
            Error::UpstreamServiceFailure { .. } => 5205,
            Error::InvalidConfig(_) => 5000,
            Error::Io(_) | Error::Internal(_) => 5001,
        }
    }

    /// Short category message for the response envelope
    pub fn message(&self) -> &'static str {
        match self {
            Error::ClusterNotFound(_) => "cluster not found",
            Error::NodeUnreachable { .. } => "zookeeper node unreachable",
            Error::NodeErrorResponse { .. } => "zookeeper node returned an error",
            Error::MalformedStatusResponse { .. } => "malformed zookeeper status response",
            Error::UpstreamServiceFailure { .. } => "get replicated table status failed",
            Error::InvalidConfig(_) => "invalid configuration",
            Error::Io(_) | Error::Internal(_) => "internal error",
        }
    }

    /// Host of the failing node, for node-level faults
    pub fn host(&self) -> Option<&str> {
        match self {
            Error::NodeUnreachable { host, .. }
            | Error::NodeErrorResponse { host, .. }
            | Error::MalformedStatusResponse { host, .. } => Some(host),
            _ => None,
        }
    }

    /// Convert to HTTP status code
    pub fn to_http_status(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Error::ClusterNotFound(_) => StatusCode::NOT_FOUND,
            Error::NodeUnreachable { .. }
            | Error::NodeErrorResponse { .. }
            | Error::MalformedStatusResponse { .. }
            | Error::UpstreamServiceFailure { .. } => StatusCode::BAD_GATEWAY,
            Error::InvalidConfig(_) => StatusCode::BAD_REQUEST,
            Error::Io(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::InvalidConfig(e.to_string())
    }
}
