//! HTTP API
//!
//! Every response is wrapped in the `{code, message, data}` envelope.

use crate::common::{request_tracing_middleware, ApiResponse, Result};
use crate::service::StatusService;
use crate::zookeeper::{NodeStatus, ReplicationStatusMatrix};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared state for HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<StatusService>,
}

/// Creates the HTTP router with all public endpoints.
pub fn create_router(state: AppState) -> Router {
    let zk = Router::new()
        .route("/clusters", get(list_clusters))
        .route("/status/:cluster_name", get(zk_status))
        .route(
            "/replicated-table-status/:cluster_name",
            get(replicated_table_status),
        );

    Router::new()
        .nest("/api/v1/zk", zk)
        .route("/health/live", get(health_live))
        .layer(axum::middleware::from_fn(request_tracing_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Status of every ensemble node of a cluster
async fn zk_status(
    State(state): State<AppState>,
    Path(cluster_name): Path<String>,
) -> Result<Json<ApiResponse<Vec<NodeStatus>>>> {
    let statuses = state
        .service
        .node_statuses(&cluster_name)
        .await
        .inspect_err(|e| {
            tracing::warn!(cluster = %cluster_name, error = %e, "Ensemble status failed")
        })?;
    Ok(Json(ApiResponse::ok(statuses)))
}

/// Replicated table status of a cluster, laid out by shard and replica
async fn replicated_table_status(
    State(state): State<AppState>,
    Path(cluster_name): Path<String>,
) -> Result<Json<ApiResponse<ReplicationStatusMatrix>>> {
    let matrix = state
        .service
        .replicated_table_status(&cluster_name)
        .await
        .inspect_err(|e| {
            tracing::warn!(cluster = %cluster_name, error = %e, "Replicated table status failed")
        })?;
    Ok(Json(ApiResponse::ok(matrix)))
}

async fn list_clusters(State(state): State<AppState>) -> Json<ApiResponse<Vec<String>>> {
    Json(ApiResponse::ok(state.service.cluster_names()))
}

/// Liveness check
async fn health_live() -> impl IntoResponse {
    Json(ApiResponse::ok(json!({
        "alive": true,
        "version": env!("CARGO_PKG_VERSION"),
    })))
}
