//! Request and response bodies for the ragsim HTTP API.
//!
//! Field names and shapes are fixed; the browser frontend depends on them.

use ragsim_core::NodeId;
use serde::{Deserialize, Serialize};

/// Body of the edge-creating endpoints.
///
/// Both fields follow edge direction in the graph: for `/edge/request`,
/// `src` is the process and `dst` the resource; for `/edge/alloc` the roles
/// flip (`src` = resource, `dst` = process).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddEdgeBody {
    /// Edge source node.
    pub src: NodeId,
    /// Edge target node.
    pub dst: NodeId,
}

/// Body of `/alloc/release`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseBody {
    /// The resource whose allocation to drop.
    pub src: NodeId,
}

/// Response of the node-creating endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeCreated {
    /// The freshly minted node id.
    pub node: NodeId,
}

/// Response of `/nodes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeList {
    /// Process ids in creation order.
    pub processes: Vec<NodeId>,
    /// Resource ids in creation order.
    pub resources: Vec<NodeId>,
}

/// Plain acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    /// `"ok"` for accepted mutations, `"reset"` after a reset.
    pub status: String,
}

impl Ack {
    /// The mutation was applied.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }

    /// The graph was cleared.
    pub fn reset() -> Self {
        Self {
            status: "reset".to_string(),
        }
    }
}

/// Response of `/alloc/release`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Released {
    /// The process that held the resource, or `null` if it was free.
    pub released_by: Option<NodeId>,
}

/// Response of `/auto_allocate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoAllocated {
    /// Number of allocations granted by this call.
    pub allocated: usize,
}

/// Response of `/deadlocks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deadlocks {
    /// Every circular wait, each cycle starting at its earliest-created
    /// process.
    pub cycles: Vec<Vec<NodeId>>,
}
