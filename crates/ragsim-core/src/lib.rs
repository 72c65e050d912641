//! Core engine for the ragsim resource allocation graph simulator.
//!
//! This crate provides:
//! - The allocation graph with request and allocation transitions
//! - Auto-allocation of pending requests in arrival order
//! - Deadlock detection over the wait-for projection

pub mod deadlock;
pub mod error;
pub mod graph;

pub use deadlock::WaitForGraph;
pub use error::{Error, Result};
pub use graph::{AllocationGraph, Edge, EdgeKind, Node, NodeId, NodeKind, Snapshot};
