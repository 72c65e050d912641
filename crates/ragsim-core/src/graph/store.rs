//! The allocation graph engine.

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};

use super::types::{Edge, EdgeKind, Node, NodeId, NodeKind, Snapshot};

/// The resource allocation graph.
///
/// Owns the canonical node and edge sets and enforces the structural
/// invariants:
/// - node identifiers are unique and immutable;
/// - a request edge runs from an existing process to an existing resource,
///   with at most one request per (process, resource) pair;
/// - an allocation edge runs from an existing resource to an existing
///   process, with at most one outgoing allocation per resource;
/// - granting an allocation removes the satisfied request in the same
///   transition.
///
/// Every mutation validates first and only then applies, so a failed call
/// leaves the graph untouched. Nodes and edges are kept in insertion order;
/// that order is canonical for [`snapshot`](Self::snapshot) and for the
/// auto-allocation tie-break.
pub struct AllocationGraph {
    /// Nodes in creation order.
    nodes: Vec<Node>,
    /// Node kind by id, for membership and kind checks.
    kinds: FxHashMap<NodeId, NodeKind>,
    /// Edges in insertion order.
    edges: Vec<Edge>,
    /// Sequence counter for process ids (`P1`, `P2`, ...).
    next_process: u32,
    /// Sequence counter for resource ids (`R1`, `R2`, ...).
    next_resource: u32,
}

impl AllocationGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            kinds: FxHashMap::default(),
            edges: Vec::new(),
            next_process: 0,
            next_resource: 0,
        }
    }

    /// Mint the next process node. Never fails.
    pub fn add_process(&mut self) -> NodeId {
        self.next_process += 1;
        self.insert_node(NodeKind::Process, self.next_process)
    }

    /// Mint the next resource node. Never fails.
    pub fn add_resource(&mut self) -> NodeId {
        self.next_resource += 1;
        self.insert_node(NodeKind::Resource, self.next_resource)
    }

    fn insert_node(&mut self, kind: NodeKind, seq: u32) -> NodeId {
        let id = NodeId::mint(kind, seq);
        self.kinds.insert(id.clone(), kind);
        self.nodes.push(Node {
            id: id.clone(),
            kind,
        });
        tracing::info!("added node {}", id);
        id
    }

    /// Add a request edge `process -> resource`.
    ///
    /// A process may request a resource it currently holds; the detector
    /// then reports the resulting length-1 wait cycle.
    pub fn add_request(&mut self, process: &NodeId, resource: &NodeId) -> Result<()> {
        if !self.is_kind(process, NodeKind::Process) {
            return Err(Error::InvalidEdge(format!(
                "{process} is not a known process"
            )));
        }
        if !self.is_kind(resource, NodeKind::Resource) {
            return Err(Error::InvalidEdge(format!(
                "{resource} is not a known resource"
            )));
        }
        if self.has_request(process, resource) {
            return Err(Error::InvalidEdge(format!(
                "request {process} -> {resource} already exists"
            )));
        }

        self.edges.push(Edge {
            source: process.clone(),
            target: resource.clone(),
            kind: EdgeKind::Request,
        });
        tracing::info!("request added: {} -> {}", process, resource);
        Ok(())
    }

    /// Allocate `resource` to `process` (edge `resource -> process`).
    ///
    /// Granting the allocation also removes a pending
    /// `request(process, resource)` edge: a satisfied request never
    /// coexists with its own allocation. Both changes happen within this
    /// one call, so callers holding the graph see either neither or both.
    pub fn add_allocation(&mut self, resource: &NodeId, process: &NodeId) -> Result<()> {
        if !self.is_kind(resource, NodeKind::Resource) {
            return Err(Error::AllocationConflict(format!(
                "{resource} is not a known resource"
            )));
        }
        if !self.is_kind(process, NodeKind::Process) {
            return Err(Error::AllocationConflict(format!(
                "{process} is not a known process"
            )));
        }
        if let Some(holder) = self.holder(resource) {
            return Err(Error::AllocationConflict(format!(
                "{resource} is already allocated to {holder}"
            )));
        }

        self.grant(resource, process);
        Ok(())
    }

    /// Release the allocation held on `resource`.
    ///
    /// Returns the process that held it, or `None` if the resource has no
    /// outgoing allocation (also when the id is unknown or names a
    /// process). A no-op release is not an error and changes nothing.
    pub fn release_allocation(&mut self, resource: &NodeId) -> Option<NodeId> {
        let pos = self
            .edges
            .iter()
            .position(|e| e.kind == EdgeKind::Allocation && e.source == *resource)?;
        let edge = self.edges.remove(pos);
        tracing::info!("released allocation {} -> {}", edge.source, edge.target);
        Some(edge.target)
    }

    /// Grant every pending request whose resource is free.
    ///
    /// Works over a snapshot of the requests taken at call time, in edge
    /// insertion order: when several processes wait on the same free
    /// resource, the earliest-inserted request wins and later ones stay
    /// pending. The free-check runs against the live graph, so a grant made
    /// earlier in the pass blocks later requesters of the same resource.
    /// Newly granted allocations are not re-examined within the pass.
    ///
    /// Returns the number of allocations granted.
    pub fn auto_allocate(&mut self) -> usize {
        let pending: Vec<(NodeId, NodeId)> = self
            .requests()
            .map(|(p, r)| (p.clone(), r.clone()))
            .collect();

        let mut granted = 0;
        for (process, resource) in pending {
            if self.holder(&resource).is_none() {
                self.grant(&resource, &process);
                granted += 1;
            }
        }
        if granted > 0 {
            tracing::info!("auto-allocated {} resource(s)", granted);
        }
        granted
    }

    /// Clear all nodes and edges and restart id numbering at `P1`/`R1`.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.kinds.clear();
        self.edges.clear();
        self.next_process = 0;
        self.next_resource = 0;
        tracing::info!("graph reset");
    }

    /// Insertion-ordered projection of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    /// Ids of all process nodes in creation order.
    pub fn processes(&self) -> Vec<NodeId> {
        self.ids_of_kind(NodeKind::Process)
    }

    /// Ids of all resource nodes in creation order.
    pub fn resources(&self) -> Vec<NodeId> {
        self.ids_of_kind(NodeKind::Resource)
    }

    /// Pending `(process, resource)` request pairs in insertion order.
    pub fn requests(&self) -> impl Iterator<Item = (&NodeId, &NodeId)> {
        self.edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Request)
            .map(|e| (&e.source, &e.target))
    }

    /// The process currently holding `resource`, if any.
    pub fn holder(&self, resource: &NodeId) -> Option<&NodeId> {
        self.edges
            .iter()
            .find(|e| e.kind == EdgeKind::Allocation && e.source == *resource)
            .map(|e| &e.target)
    }

    /// Enumerate every circular wait currently in the graph.
    ///
    /// Convenience over [`WaitForGraph`](crate::deadlock::WaitForGraph);
    /// see that module for the derivation and the pinned output order.
    pub fn find_deadlocks(&self) -> Vec<Vec<NodeId>> {
        crate::deadlock::WaitForGraph::build(self).find_cycles()
    }

    /// Number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn ids_of_kind(&self, kind: NodeKind) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.kind == kind)
            .map(|n| n.id.clone())
            .collect()
    }

    fn is_kind(&self, id: &NodeId, kind: NodeKind) -> bool {
        self.kinds.get(id) == Some(&kind)
    }

    fn has_request(&self, process: &NodeId, resource: &NodeId) -> bool {
        self.edges.iter().any(|e| {
            e.kind == EdgeKind::Request && e.source == *process && e.target == *resource
        })
    }

    /// Insert the allocation edge and clear the satisfied request, if any.
    /// All validation happens before this point.
    fn grant(&mut self, resource: &NodeId, process: &NodeId) {
        self.edges.retain(|e| {
            !(e.kind == EdgeKind::Request && e.source == *process && e.target == *resource)
        });
        self.edges.push(Edge {
            source: resource.clone(),
            target: process.clone(),
            kind: EdgeKind::Allocation,
        });
        tracing::info!("allocation added: {} -> {}", resource, process);
    }
}

impl Default for AllocationGraph {
    fn default() -> Self {
        Self::new()
    }
}
