//! HTTP routes for the ragsim server.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    response::Json,
    routing::{get, post},
};
use ragsim_core::{AllocationGraph, Snapshot};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use crate::error::ApiResult;
use crate::protocol::{
    Ack, AddEdgeBody, AutoAllocated, Deadlocks, NodeCreated, NodeList, ReleaseBody, Released,
};

/// Application state shared across handlers.
pub struct AppState {
    /// The single engine instance. Invariants span multiple edges, so every
    /// operation runs under this one lock: mutations take the write half,
    /// queries the read half.
    pub graph: RwLock<AllocationGraph>,
}

impl AppState {
    /// State with a fresh, empty graph.
    pub fn new() -> Self {
        Self {
            graph: RwLock::new(AllocationGraph::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/nodes", get(nodes_handler))
        .route("/nodes/process", post(create_process_handler))
        .route("/nodes/resource", post(create_resource_handler))
        .route("/edge/request", post(add_request_handler))
        .route("/edge/alloc", post(add_alloc_handler))
        .route("/alloc/release", post(release_handler))
        .route("/auto_allocate", post(auto_allocate_handler))
        .route("/deadlocks", get(deadlocks_handler))
        .route("/graph", get(graph_handler))
        .route("/reset", post(reset_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// List node ids grouped by kind, in creation order.
pub async fn nodes_handler(State(state): State<Arc<AppState>>) -> Json<NodeList> {
    let graph = state.graph.read().await;
    Json(NodeList {
        processes: graph.processes(),
        resources: graph.resources(),
    })
}

/// Mint the next process node.
pub async fn create_process_handler(State(state): State<Arc<AppState>>) -> Json<NodeCreated> {
    let node = state.graph.write().await.add_process();
    Json(NodeCreated { node })
}

/// Mint the next resource node.
pub async fn create_resource_handler(State(state): State<Arc<AppState>>) -> Json<NodeCreated> {
    let node = state.graph.write().await.add_resource();
    Json(NodeCreated { node })
}

/// Add a request edge; `src` is the process, `dst` the resource.
pub async fn add_request_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AddEdgeBody>,
) -> ApiResult<Json<Ack>> {
    state.graph.write().await.add_request(&body.src, &body.dst)?;
    Ok(Json(Ack::ok()))
}

/// Add an allocation edge; `src` is the resource, `dst` the process.
pub async fn add_alloc_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AddEdgeBody>,
) -> ApiResult<Json<Ack>> {
    state
        .graph
        .write()
        .await
        .add_allocation(&body.src, &body.dst)?;
    Ok(Json(Ack::ok()))
}

/// Release the allocation held on a resource. Releasing a free resource is
/// a 200 with `released_by: null`, not an error.
pub async fn release_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ReleaseBody>,
) -> Json<Released> {
    let released_by = state.graph.write().await.release_allocation(&body.src);
    Json(Released { released_by })
}

/// Grant every pending request whose resource is free.
pub async fn auto_allocate_handler(State(state): State<Arc<AppState>>) -> Json<AutoAllocated> {
    let allocated = state.graph.write().await.auto_allocate();
    Json(AutoAllocated { allocated })
}

/// Enumerate current deadlocks.
pub async fn deadlocks_handler(State(state): State<Arc<AppState>>) -> Json<Deadlocks> {
    let cycles = state.graph.read().await.find_deadlocks();
    Json(Deadlocks { cycles })
}

/// Full graph snapshot.
pub async fn graph_handler(State(state): State<Arc<AppState>>) -> Json<Snapshot> {
    Json(state.graph.read().await.snapshot())
}

/// Clear the graph and restart id numbering.
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<Ack> {
    state.graph.write().await.reset();
    Json(Ack::reset())
}
