//! Flow centrality for referral forests
//!
//! In a forest the path between an ancestor `a` of `v` and a descendant `d`
//! of `v` is unique and passes through `v`. The number of (source, target)
//! pairs brokered by `v` is therefore `ancestors(v) * descendants(v)`.

use super::common::GraphView;
use super::reach::{depths, subtree_sizes};

/// Brokered-pair count for every node. Roots and leaves score 0.
pub fn flow_centrality(view: &GraphView) -> Vec<u64> {
    let ancestors = depths(view);
    let descendants = subtree_sizes(view);

    ancestors
        .into_iter()
        .zip(descendants)
        .map(|(up, down)| up as u64 * down as u64)
        .collect()
}
