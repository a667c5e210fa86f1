//! Transport for the AdminServer diagnostic endpoint

use crate::cluster::NodeAddress;
use crate::common::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::error::Error as StdError;
use std::time::Duration;

/// Fetches the raw `mntr` body of one node
#[async_trait]
pub trait StatusClient: Send + Sync {
    async fn fetch_mntr(&self, node: &NodeAddress) -> Result<Bytes>;
}

/// HTTP client for `GET http://<host>:<port>/commands/mntr`
///
/// A single attempt per call. Anything but `200 OK` is an error carrying the
/// status line.
#[derive(Clone)]
pub struct HttpStatusClient {
    client: reqwest::Client,
}

impl HttpStatusClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl StatusClient for HttpStatusClient {
    async fn fetch_mntr(&self, node: &NodeAddress) -> Result<Bytes> {
        let unreachable = |e: reqwest::Error| Error::NodeUnreachable {
            host: node.to_string(),
            reason: error_chain(&e),
        };

        let response = self
            .client
            .get(node.mntr_url())
            .send()
            .await
            .map_err(unreachable)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(Error::NodeErrorResponse {
                host: node.to_string(),
                status: status.to_string(),
            });
        }

        response.bytes().await.map_err(unreachable)
    }
}

/// Render an error with its sources, e.g. `error sending request: connection refused`
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Layer(&'static str, Option<Box<Layer>>);

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    impl StdError for Layer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.1.as_deref().map(|l| l as &(dyn StdError + 'static))
        }
    }

    #[test]
    fn test_error_chain() {
        let err = Layer(
            "error sending request",
            Some(Box::new(Layer(
                "client error (Connect)",
                Some(Box::new(Layer("Connection refused", None))),
            ))),
        );
        assert_eq!(
            error_chain(&err),
            "error sending request: client error (Connect): Connection refused"
        );
    }

    #[test]
    fn test_error_chain_skips_repeated_cause() {
        let err = Layer(
            "timed out: operation timed out",
            Some(Box::new(Layer("operation timed out", None))),
        );
        assert_eq!(error_chain(&err), "timed out: operation timed out");
    }
}
