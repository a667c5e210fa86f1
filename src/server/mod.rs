//! HTTP server

pub mod http;

use crate::common::{Result, ServerConfig};
use crate::service::StatusService;
use self::http::{create_router, AppState};
use std::sync::Arc;

pub struct Server {
    config: ServerConfig,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Serve until Ctrl-C.
    pub async fn serve(self, service: Arc<StatusService>) -> Result<()> {
        tracing::info!("Starting zkstat server");
        tracing::info!("  HTTP API: {}", self.config.bind_addr);
        tracing::info!("  Clusters: {}", service.cluster_names().join(", "));

        let router = create_router(AppState { service });
        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;

        tracing::info!("✓ zkstat ready");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("zkstat stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
