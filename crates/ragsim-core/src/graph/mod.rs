//! Resource allocation graph construction.
//!
//! This module provides:
//! - Node and edge types with their wire representation
//! - The [`AllocationGraph`] engine and its transitions
//! - Insertion-ordered snapshots for rendering

mod store;
mod types;

pub use store::AllocationGraph;
pub use types::{Edge, EdgeKind, Node, NodeId, NodeKind, Snapshot};
