//! Types for the allocation graph.

use serde::{Deserialize, Serialize};

/// Identifier of a graph node (`"P1"`, `"R3"`, ...).
///
/// Minted by [`AllocationGraph`](super::AllocationGraph): the prefix encodes
/// the node kind and the suffix is the per-kind creation counter. Serializes
/// as a bare JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub(crate) fn mint(kind: NodeKind, seq: u32) -> Self {
        Self(format!("{}{}", kind.prefix(), seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Kind of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// A process: requests and holds resources.
    #[serde(rename = "P")]
    Process,
    /// A single-unit resource: allocated to at most one process at a time.
    #[serde(rename = "R")]
    Resource,
}

impl NodeKind {
    fn prefix(self) -> char {
        match self {
            NodeKind::Process => 'P',
            NodeKind::Resource => 'R',
        }
    }
}

/// Kind of a directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Process -> Resource: unmet demand.
    #[serde(rename = "request")]
    Request,
    /// Resource -> Process: current ownership.
    #[serde(rename = "alloc")]
    Allocation,
}

/// A node as it appears in a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

/// An edge as it appears in a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

/// Read-only projection of the whole graph.
///
/// Both sequences are in insertion order, so two snapshots of the same
/// state compare equal and serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}
