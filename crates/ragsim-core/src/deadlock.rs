//! Deadlock detection over the wait-for projection.
//!
//! The wait-for graph collapses the bipartite allocation graph onto its
//! process nodes: an edge `P -> Q` means `P` requests a resource that `Q`
//! currently holds. Requests on free resources produce no edge, so a
//! process waiting on an unheld resource is never part of a deadlock.
//! Every circular wait in the allocation graph corresponds to exactly one
//! elementary cycle here.

use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::graph::{AllocationGraph, NodeId};

/// The wait-for projection of an [`AllocationGraph`].
///
/// Process nodes are inserted in creation order, so `NodeIndex` order is
/// creation order. [`find_cycles`](Self::find_cycles) relies on this to pin
/// the reported ordering.
#[derive(Debug)]
pub struct WaitForGraph {
    graph: DiGraph<NodeId, ()>,
}

impl WaitForGraph {
    /// Project the wait-for graph out of the current allocation state.
    pub fn build(rag: &AllocationGraph) -> Self {
        let mut graph = DiGraph::new();
        let mut index_of: FxHashMap<NodeId, NodeIndex> = FxHashMap::default();
        for process in rag.processes() {
            let ix = graph.add_node(process.clone());
            index_of.insert(process, ix);
        }
        for (process, resource) in rag.requests() {
            let Some(holder) = rag.holder(resource) else {
                continue;
            };
            // Both endpoints are processes, so both lookups succeed.
            if let (Some(&waiter), Some(&holder)) =
                (index_of.get(process), index_of.get(holder))
            {
                graph.update_edge(waiter, holder, ());
            }
        }
        Self { graph }
    }

    /// Enumerate every elementary cycle, i.e. every deadlock.
    ///
    /// The output is deterministic: each cycle is listed starting from its
    /// earliest-created process and follows wait-for direction, and the
    /// cycles themselves are sorted by their creation-order sequences. A
    /// single process waiting on a resource it holds comes back as a
    /// length-1 cycle.
    pub fn find_cycles(&self) -> Vec<Vec<NodeId>> {
        let mut cycles: Vec<Vec<NodeIndex>> = Vec::new();

        // Every elementary cycle lives inside one strongly connected
        // component, so the search never has to leave its component.
        for scc in kosaraju_scc(&self.graph) {
            if scc.len() == 1 {
                let v = scc[0];
                if self.graph.find_edge(v, v).is_some() {
                    cycles.push(vec![v]);
                }
                continue;
            }

            let members: FxHashSet<NodeIndex> = scc.iter().copied().collect();
            let mut roots = scc;
            roots.sort_unstable();
            for root in roots {
                let mut path = vec![root];
                let mut on_path = FxHashSet::default();
                on_path.insert(root);
                self.cycles_through(root, root, &members, &mut path, &mut on_path, &mut cycles);
            }
        }

        cycles.sort();
        cycles
            .into_iter()
            .map(|cycle| cycle.into_iter().map(|ix| self.graph[ix].clone()).collect())
            .collect()
    }

    /// Depth-first search for elementary cycles through `root`.
    ///
    /// Only vertices above `root` (in index order) are explored, so each
    /// cycle is found exactly once: when `root` is its minimal vertex. A
    /// self-loop on `root` closes immediately with `path == [root]`.
    fn cycles_through(
        &self,
        v: NodeIndex,
        root: NodeIndex,
        members: &FxHashSet<NodeIndex>,
        path: &mut Vec<NodeIndex>,
        on_path: &mut FxHashSet<NodeIndex>,
        cycles: &mut Vec<Vec<NodeIndex>>,
    ) {
        for next in self.graph.neighbors(v) {
            if next == root {
                cycles.push(path.clone());
            } else if next > root && members.contains(&next) && !on_path.contains(&next) {
                path.push(next);
                on_path.insert(next);
                self.cycles_through(next, root, members, path, on_path, cycles);
                on_path.remove(&next);
                path.pop();
            }
        }
    }

    /// Number of processes in the projection.
    pub fn process_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct wait-for edges.
    pub fn wait_count(&self) -> usize {
        self.graph.edge_count()
    }
}
