//! Greedy unique-reach influencer selection
//!
//! Picking `k` users whose combined descendant sets cover the most users is
//! the maximum-coverage problem, which is NP-hard. This module runs the
//! standard greedy approximation: each round takes the user adding the most
//! not-yet-covered descendants. The result is a (1 - 1/e)-approximation, not
//! an optimal cover.
//!
//! Marginal gains only shrink as coverage grows (submodularity), so gains are
//! kept in a max-heap as upper bounds and re-evaluated lazily. The picks and
//! their tie-breaking (lowest index first) are identical to the plain loop.

use super::common::{GraphView, NodeIndex};
use super::reach::{descendants, subtree_sizes};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// One greedy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoveragePick {
    pub node: NodeIndex,
    /// Descendants this pick added to the covered set
    pub gain: usize,
}

/// Heap entry: a gain bound computed when `round` picks had been made
#[derive(Copy, Clone, PartialEq, Eq)]
struct Candidate {
    gain: usize,
    node: NodeIndex,
    round: usize,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Larger gain first, then lower index
        self.gain
            .cmp(&other.gain)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Greedy maximum coverage over descendant sets.
///
/// Stops when the best remaining gain is zero, every node has been
/// considered, or `limit` picks have been made.
pub fn greedy_unique_reach(view: &GraphView, limit: Option<usize>) -> Vec<CoveragePick> {
    let limit = limit.unwrap_or(view.node_count);
    let mut picks = Vec::new();
    if limit == 0 {
        return picks;
    }

    // With nothing covered, a node's gain is exactly its reach. Zero bounds
    // can never grow, so leaves are left out.
    let mut heap: BinaryHeap<Candidate> = subtree_sizes(view)
        .into_iter()
        .enumerate()
        .filter(|&(_, gain)| gain > 0)
        .map(|(node, gain)| Candidate { gain, node, round: 0 })
        .collect();

    let mut covered = vec![false; view.node_count];

    while let Some(top) = heap.pop() {
        if top.round == picks.len() {
            if top.gain == 0 {
                break;
            }
            for idx in descendants(view, top.node) {
                covered[idx] = true;
            }
            picks.push(CoveragePick {
                node: top.node,
                gain: top.gain,
            });
            if picks.len() >= limit {
                break;
            }
            continue;
        }

        let gain = uncovered_descendants(view, top.node, &covered);
        if gain > 0 {
            heap.push(Candidate {
                gain,
                node: top.node,
                round: picks.len(),
            });
        }
    }

    picks
}

/// Count of `source`'s descendants not yet covered.
///
/// Coverage is always a union of whole descendant sets, so a covered node's
/// subtree is covered too and the walk can stop there.
fn uncovered_descendants(view: &GraphView, source: NodeIndex, covered: &[bool]) -> usize {
    let mut count = 0;
    let mut stack: Vec<NodeIndex> = view.successors(source).to_vec();

    while let Some(idx) = stack.pop() {
        if covered[idx] {
            continue;
        }
        count += 1;
        stack.extend_from_slice(view.successors(idx));
    }

    count
}
