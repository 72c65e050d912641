//! Handler-level tests for the HTTP API.
//!
//! Handlers are called directly with constructed extractors; the engine
//! behind the state is real, so these cover the full path from request body
//! to response body minus the socket.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use ragsim_core::NodeId;
use ragsim_server::error::ApiError;
use ragsim_server::protocol::{AddEdgeBody, ReleaseBody};
use ragsim_server::routes::*;

fn fresh_state() -> Arc<AppState> {
    Arc::new(AppState::new())
}

fn edge(src: &str, dst: &str) -> Json<AddEdgeBody> {
    Json(AddEdgeBody {
        src: NodeId::from(src),
        dst: NodeId::from(dst),
    })
}

/// Create `p` processes and `r` resources through the handlers.
async fn populate(state: &Arc<AppState>, p: usize, r: usize) {
    for _ in 0..p {
        create_process_handler(State(state.clone())).await;
    }
    for _ in 0..r {
        create_resource_handler(State(state.clone())).await;
    }
}

#[tokio::test]
async fn test_create_and_list_nodes() {
    let state = fresh_state();

    let Json(created) = create_process_handler(State(state.clone())).await;
    assert_eq!(created.node, NodeId::from("P1"));
    let Json(created) = create_process_handler(State(state.clone())).await;
    assert_eq!(created.node, NodeId::from("P2"));
    let Json(created) = create_resource_handler(State(state.clone())).await;
    assert_eq!(created.node, NodeId::from("R1"));

    let Json(list) = nodes_handler(State(state.clone())).await;
    assert_eq!(list.processes, vec![NodeId::from("P1"), NodeId::from("P2")]);
    assert_eq!(list.resources, vec![NodeId::from("R1")]);
}

#[tokio::test]
async fn test_request_then_graph_snapshot() {
    let state = fresh_state();
    populate(&state, 1, 1).await;

    let Json(ack) = add_request_handler(State(state.clone()), edge("P1", "R1"))
        .await
        .expect("valid request edge");
    assert_eq!(ack.status, "ok");

    let Json(snapshot) = graph_handler(State(state.clone())).await;
    let json = serde_json::to_value(&snapshot).expect("snapshot serializes");
    assert_eq!(
        json,
        serde_json::json!({
            "nodes": [
                {"id": "P1", "type": "P"},
                {"id": "R1", "type": "R"},
            ],
            "edges": [
                {"source": "P1", "target": "R1", "type": "request"},
            ],
        })
    );
}

#[tokio::test]
async fn test_invalid_request_maps_to_400() {
    let state = fresh_state();
    populate(&state, 0, 1).await;

    let err = add_request_handler(State(state.clone()), edge("P9", "R1"))
        .await
        .expect_err("unknown process must be rejected");
    assert!(matches!(err, ApiError::Engine(_)));
    assert!(err.to_string().contains("P9"));

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_allocation_conflict_maps_to_400() {
    let state = fresh_state();
    populate(&state, 2, 1).await;

    add_alloc_handler(State(state.clone()), edge("R1", "P1"))
        .await
        .expect("first allocation");

    let err = add_alloc_handler(State(state.clone()), edge("R1", "P2"))
        .await
        .expect_err("held resource must reject a second allocation");
    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

    // The original holder is untouched.
    let Json(snapshot) = graph_handler(State(state.clone())).await;
    assert_eq!(snapshot.edges.len(), 1);
}

#[tokio::test]
async fn test_release_reports_holder_then_null() {
    let state = fresh_state();
    populate(&state, 1, 1).await;
    add_alloc_handler(State(state.clone()), edge("R1", "P1"))
        .await
        .expect("allocation");

    let release = Json(ReleaseBody {
        src: NodeId::from("R1"),
    });
    let Json(released) = release_handler(State(state.clone()), release.clone()).await;
    assert_eq!(released.released_by, Some(NodeId::from("P1")));

    let Json(released) = release_handler(State(state.clone()), release).await;
    assert_eq!(released.released_by, None, "second release is a no-op");
}

#[tokio::test]
async fn test_auto_allocate_counts_grants() {
    let state = fresh_state();
    populate(&state, 2, 2).await;
    add_request_handler(State(state.clone()), edge("P1", "R1"))
        .await
        .expect("request");
    add_request_handler(State(state.clone()), edge("P2", "R2"))
        .await
        .expect("request");

    let Json(result) = auto_allocate_handler(State(state.clone())).await;
    assert_eq!(result.allocated, 2);

    let Json(result) = auto_allocate_handler(State(state.clone())).await;
    assert_eq!(result.allocated, 0, "nothing left to grant");
}

#[tokio::test]
async fn test_deadlocks_reports_circular_wait() {
    let state = fresh_state();
    populate(&state, 2, 2).await;
    add_alloc_handler(State(state.clone()), edge("R1", "P1"))
        .await
        .expect("grant");
    add_alloc_handler(State(state.clone()), edge("R2", "P2"))
        .await
        .expect("grant");
    add_request_handler(State(state.clone()), edge("P1", "R2"))
        .await
        .expect("request");
    add_request_handler(State(state.clone()), edge("P2", "R1"))
        .await
        .expect("request");

    let Json(deadlocks) = deadlocks_handler(State(state.clone())).await;
    assert_eq!(
        deadlocks.cycles,
        vec![vec![NodeId::from("P1"), NodeId::from("P2")]]
    );
}

#[tokio::test]
async fn test_reset_clears_graph_and_numbering() {
    let state = fresh_state();
    populate(&state, 2, 2).await;
    add_request_handler(State(state.clone()), edge("P1", "R1"))
        .await
        .expect("request");

    let Json(ack) = reset_handler(State(state.clone())).await;
    assert_eq!(ack.status, "reset");

    let Json(list) = nodes_handler(State(state.clone())).await;
    assert!(list.processes.is_empty());
    assert!(list.resources.is_empty());

    let Json(created) = create_process_handler(State(state.clone())).await;
    assert_eq!(created.node, NodeId::from("P1"), "numbering restarts");
}

#[tokio::test]
async fn test_health_reports_version() {
    let Json(health) = health_handler().await;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["version"], env!("CARGO_PKG_VERSION"));
}
