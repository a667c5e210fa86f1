//! Ensemble status over real HTTP against fake AdminServer nodes

use axum::{http::StatusCode, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use zkstat::zookeeper::HttpStatusClient;
use zkstat::{Error, NodeAddress, NodeStatusAggregator};

const LEADER: &str = r#"{"version": "3.6.2--803c7f1a12f85978cb049af5e4ef23bd8b688715, built on 09/04/2020 12:44 GMT", "server_state": "leader", "peer_state": "leading - broadcast", "avg_latency": 0.3, "approximate_data_size": 141979, "znode_count": 926, "synced_followers": 2}"#;
const FOLLOWER: &str = r#"{"version": "3.6.2--803c7f1a12f85978cb049af5e4ef23bd8b688715, built on 09/04/2020 12:44 GMT", "server_state": "follower", "peer_state": "following - broadcast", "avg_latency": 0.4929, "approximate_data_size": 141979, "znode_count": 926}"#;

/// Serve `/commands/mntr` on an ephemeral port
async fn spawn_node(status: StatusCode, body: &'static str, delay: Duration) -> NodeAddress {
    let app = Router::new().route(
        "/commands/mntr",
        get(move || async move {
            tokio::time::sleep(delay).await;
            (status, body)
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    NodeAddress::new("127.0.0.1", port)
}

/// An address nothing listens on
async fn closed_port() -> NodeAddress {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    NodeAddress::new("127.0.0.1", port)
}

fn aggregator(concurrency: usize) -> NodeStatusAggregator {
    let client = HttpStatusClient::new(Duration::from_secs(5)).unwrap();
    NodeStatusAggregator::new(Arc::new(client), concurrency)
}

#[tokio::test]
async fn test_ensemble_status_in_order() {
    // The slow first node must still come first under fan-out
    let nodes = vec![
        spawn_node(StatusCode::OK, FOLLOWER, Duration::from_millis(200)).await,
        spawn_node(StatusCode::OK, LEADER, Duration::ZERO).await,
        spawn_node(StatusCode::OK, FOLLOWER, Duration::ZERO).await,
    ];

    for concurrency in [1, 3] {
        let statuses = aggregator(concurrency).get_statuses(&nodes).await.unwrap();
        assert_eq!(statuses.len(), 3);
        let states: Vec<&str> = statuses.iter().map(|s| s.server_state.as_str()).collect();
        assert_eq!(states, vec!["follower", "leader", "follower"]);
        assert!(statuses.iter().all(|s| s.version == "3.6.2"));
        assert!(statuses.iter().all(|s| s.host == "127.0.0.1"));
        assert_eq!(statuses[0].avg_latency, 0.4929);
        assert_eq!(statuses[1].peer_state, "leading - broadcast");
    }
}

#[tokio::test]
async fn test_sequential_and_fan_out_agree() {
    let nodes = vec![
        spawn_node(StatusCode::OK, LEADER, Duration::from_millis(50)).await,
        spawn_node(StatusCode::OK, FOLLOWER, Duration::ZERO).await,
    ];
    let sequential = aggregator(1).get_statuses(&nodes).await.unwrap();
    let fan_out = aggregator(2).get_statuses(&nodes).await.unwrap();
    assert_eq!(
        serde_json::to_vec(&sequential).unwrap(),
        serde_json::to_vec(&fan_out).unwrap()
    );
}

#[tokio::test]
async fn test_four_letter_body() {
    let body = "zk_version\t3.4.14-4c25d480e66aadd371de8bd2fd8da255ac140bcf--1, built on 03/06/2019 16:18 GMT\nzk_server_state\tstandalone\nzk_znode_count\t42\n";
    let node = spawn_node(StatusCode::OK, body, Duration::ZERO).await;
    let statuses = aggregator(1).get_statuses(&[node]).await.unwrap();
    assert_eq!(statuses[0].version, "3.4.14-4c25d480e66aadd371de8bd2fd8da255ac140bcf");
    assert_eq!(statuses[0].server_state, "standalone");
    assert_eq!(statuses[0].znode_count, 42);
}

#[tokio::test]
async fn test_error_status_fails_whole_ensemble() {
    let bad = spawn_node(StatusCode::SERVICE_UNAVAILABLE, "", Duration::ZERO).await;
    let nodes = vec![
        spawn_node(StatusCode::OK, LEADER, Duration::ZERO).await,
        bad.clone(),
        spawn_node(StatusCode::OK, FOLLOWER, Duration::ZERO).await,
    ];

    for concurrency in [1, 3] {
        let err = aggregator(concurrency).get_statuses(&nodes).await.unwrap_err();
        match err {
            Error::NodeErrorResponse { host, status } => {
                assert_eq!(host, bad.to_string());
                assert_eq!(status, "503 Service Unavailable");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[tokio::test]
async fn test_unreachable_node() {
    let down = closed_port().await;
    let nodes = vec![
        spawn_node(StatusCode::OK, LEADER, Duration::ZERO).await,
        down.clone(),
    ];
    let err = aggregator(2).get_statuses(&nodes).await.unwrap_err();
    assert!(matches!(err, Error::NodeUnreachable { .. }));
    assert_eq!(err.host(), Some(down.to_string().as_str()));
    assert_eq!(err.code(), 5202);
}

#[tokio::test]
async fn test_timeout_is_unreachable() {
    let slow = spawn_node(StatusCode::OK, LEADER, Duration::from_secs(3)).await;
    let client = HttpStatusClient::new(Duration::from_millis(200)).unwrap();
    let err = NodeStatusAggregator::new(Arc::new(client), 1)
        .get_statuses(&[slow])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NodeUnreachable { .. }));
}

#[tokio::test]
async fn test_version_without_delimiter() {
    let node = spawn_node(
        StatusCode::OK,
        r#"{"version": "3.6.2", "server_state": "leader"}"#,
        Duration::ZERO,
    )
    .await;
    let err = aggregator(1).get_statuses(&[node]).await.unwrap_err();
    assert!(matches!(err, Error::MalformedStatusResponse { .. }));
    assert_eq!(err.code(), 5204);
}

#[tokio::test]
async fn test_cancelled_request_returns_at_deadline() {
    let nodes = vec![
        spawn_node(StatusCode::OK, LEADER, Duration::from_secs(4)).await,
        spawn_node(StatusCode::OK, FOLLOWER, Duration::from_secs(4)).await,
    ];
    let aggregator = aggregator(2);

    let start = std::time::Instant::now();
    let result =
        tokio::time::timeout(Duration::from_millis(200), aggregator.get_statuses(&nodes)).await;

    assert!(result.is_err());
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_aggregation_runs_on_spawned_task() {
    let nodes = vec![spawn_node(StatusCode::OK, LEADER, Duration::ZERO).await];
    let aggregator = Arc::new(aggregator(2));

    let statuses = tokio::spawn(async move { aggregator.get_statuses(&nodes).await })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(statuses[0].server_state, "leader");
}
