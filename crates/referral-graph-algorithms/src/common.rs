//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of the referral forest for algorithm execution.

/// Dense node index (0..N). Callers map indices back to their own identifiers.
pub type NodeIndex = usize;

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
///
/// Successor order is preserved from the adjacency lists the view was built
/// from, so algorithms that report children see them in insertion order.
#[derive(Debug, Clone, Default)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,

    /// Outgoing edges CSR structure
    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<NodeIndex>,

    /// Incoming edges CSR structure (Compressed Sparse Column effectively)
    /// Offsets into `in_sources`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source node indices
    pub in_sources: Vec<NodeIndex>,
}

impl GraphView {
    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: NodeIndex) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: NodeIndex) -> &[NodeIndex] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get incoming neighbors (predecessors) of a node
    pub fn predecessors(&self, idx: NodeIndex) -> &[NodeIndex] {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        &self.in_sources[start..end]
    }

    /// The unique parent of a node in a forest, if any
    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.predecessors(idx).first().copied()
    }

    /// Nodes without a parent, in index order
    pub fn roots(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        (0..self.node_count).filter(move |&idx| self.in_degree(idx) == 0)
    }

    pub fn edge_count(&self) -> usize {
        self.out_targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Build a view from per-node successor lists.
    ///
    /// Predecessor lists are derived, so `outgoing` is the only source of truth.
    pub fn from_adjacency_list(outgoing: Vec<Vec<NodeIndex>>) -> Self {
        let node_count = outgoing.len();
        let mut incoming: Vec<Vec<NodeIndex>> = vec![Vec::new(); node_count];
        for (source, targets) in outgoing.iter().enumerate() {
            for &target in targets {
                incoming[target].push(source);
            }
        }

        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut in_offsets = Vec::with_capacity(node_count + 1);
        let mut in_sources = Vec::new();

        out_offsets.push(0);
        for neighbors in outgoing {
            out_targets.extend(neighbors);
            out_offsets.push(out_targets.len());
        }

        in_offsets.push(0);
        for sources in incoming {
            in_sources.extend(sources);
            in_offsets.push(in_sources.len());
        }

        GraphView {
            node_count,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
        }
    }

    /// Build a view from `(source, target)` pairs over `node_count` nodes.
    /// Successors keep the order in which their edges appear.
    pub fn from_edges(node_count: usize, edges: &[(NodeIndex, NodeIndex)]) -> Self {
        let mut outgoing = vec![Vec::new(); node_count];
        for &(source, target) in edges {
            outgoing[source].push(target);
        }
        Self::from_adjacency_list(outgoing)
    }
}
