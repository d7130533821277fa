//! Graph algorithms module
//!
//! Algorithms are implemented in `referral-graph-algorithms` crate.
//! This module provides the integration/adapter layer: it projects the
//! referral graph into a dense `GraphView` and maps results back to user ids.

pub mod influence;
pub mod reach;

use crate::graph::ReferralGraph;
use referral_graph_algorithms::GraphView;

// Re-export algorithms
pub use referral_graph_algorithms::{
    depths, descendant_count, flow_centrality, greedy_unique_reach, max_depth, subtree_sizes,
    top_k, CoveragePick,
};

pub use influence::{FlowInfluencer, InfluencerReach, NetworkStats, RankedUser};

/// Build a GraphView from the graph for algorithm execution.
///
/// Store indices are already dense and first-seen ordered, so view index
/// `i` is the `i`-th user of [`ReferralGraph::users`].
pub fn build_view(graph: &ReferralGraph) -> GraphView {
    GraphView::from_adjacency_list(graph.child_lists().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_view_projection() {
        let mut graph = ReferralGraph::new();
        graph.add_referral("n1", "n2").unwrap();
        graph.add_referral("n2", "n3").unwrap();
        graph.add_referral("n1", "n4").unwrap();

        let view = build_view(&graph);

        assert_eq!(view.node_count, 4);
        assert_eq!(view.edge_count(), 3);
        // n1 = 0, n2 = 1, n3 = 2, n4 = 3
        assert_eq!(view.successors(0), &[1, 3]);
        assert_eq!(view.successors(1), &[2]);
        assert_eq!(view.parent(2), Some(1));
        assert_eq!(view.out_degree(0), 2);
        assert_eq!(view.in_degree(1), 1);
    }
}
