//! Reach analysis over referral forests
//!
//! Reach of a node is the number of its strict descendants. Every function
//! here assumes the view is a forest (at most one parent per node, no cycles);
//! nodes that are not reachable from a root are ignored by the bulk passes.

use super::common::{GraphView, NodeIndex};
use std::collections::VecDeque;

/// Pre-order listing of the whole forest, roots in index order.
///
/// Iterative so deep referral chains cannot overflow the stack.
pub fn preorder(view: &GraphView) -> Vec<NodeIndex> {
    let mut order = Vec::with_capacity(view.node_count);
    let mut stack = Vec::new();

    for root in view.roots() {
        stack.push(root);
        while let Some(idx) = stack.pop() {
            order.push(idx);
            // Reverse so the first child is visited first
            stack.extend(view.successors(idx).iter().rev().copied());
        }
    }

    order
}

/// Reach of every node in one pass.
///
/// Walks the pre-order backwards, so each child is finished before its
/// parent: `reach(v) = Σ (1 + reach(child))`. O(nodes).
pub fn subtree_sizes(view: &GraphView) -> Vec<usize> {
    let mut sizes = vec![0usize; view.node_count];

    for &idx in preorder(view).iter().rev() {
        if let Some(parent) = view.parent(idx) {
            sizes[parent] += 1 + sizes[idx];
        }
    }

    sizes
}

/// All strict descendants of `source`, in depth-first order
pub fn descendants(view: &GraphView, source: NodeIndex) -> Vec<NodeIndex> {
    let mut found = Vec::new();
    let mut stack: Vec<NodeIndex> = view.successors(source).iter().rev().copied().collect();

    while let Some(idx) = stack.pop() {
        found.push(idx);
        stack.extend(view.successors(idx).iter().rev().copied());
    }

    found
}

/// Reach of a single node with one traversal
pub fn descendant_count(view: &GraphView, source: NodeIndex) -> usize {
    let mut count = 0;
    let mut stack: Vec<NodeIndex> = view.successors(source).to_vec();

    while let Some(idx) = stack.pop() {
        count += 1;
        stack.extend_from_slice(view.successors(idx));
    }

    count
}

/// Depth of every node (edges from its root). A node's depth equals the
/// number of its ancestors.
pub fn depths(view: &GraphView) -> Vec<usize> {
    let mut depth = vec![0usize; view.node_count];
    let mut queue: VecDeque<NodeIndex> = view.roots().collect();

    while let Some(idx) = queue.pop_front() {
        for &child in view.successors(idx) {
            depth[child] = depth[idx] + 1;
            queue.push_back(child);
        }
    }

    depth
}

/// Length in edges of the longest root-to-leaf path. Empty forest is 0.
pub fn max_depth(view: &GraphView) -> usize {
    depths(view).into_iter().max().unwrap_or(0)
}
