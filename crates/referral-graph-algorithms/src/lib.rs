pub mod common;
pub mod reach;
pub mod ranking;
pub mod coverage;
pub mod centrality;

pub use common::{GraphView, NodeIndex};
pub use reach::{depths, descendant_count, descendants, max_depth, preorder, subtree_sizes};
pub use ranking::top_k;
pub use coverage::{greedy_unique_reach, CoveragePick};
pub use centrality::flow_centrality;
