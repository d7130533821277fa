//! Reach queries on the referral graph

use super::build_view;
use crate::graph::{ReferralGraph, UserId};
use referral_graph_algorithms::{max_depth, subtree_sizes};

impl ReferralGraph {
    /// Number of users downstream of `user`, excluding `user` itself.
    /// Unknown ids have reach 0.
    ///
    /// Walks the stored child lists directly; use
    /// [`ReferralGraph::all_network_reaches`] when many reaches are needed.
    pub fn calculate_network_reach(&self, user: impl AsRef<str>) -> usize {
        let Some(idx) = self.index_of(user.as_ref()) else {
            return 0;
        };

        let children = self.child_lists();
        let mut count = 0;
        let mut stack = children[idx].clone();
        while let Some(child) = stack.pop() {
            count += 1;
            stack.extend_from_slice(&children[child]);
        }
        count
    }

    /// Alias of [`ReferralGraph::calculate_network_reach`]
    pub fn get_total_referral_count(&self, user: impl AsRef<str>) -> usize {
        self.calculate_network_reach(user)
    }

    /// Reach of every user from a single post-order pass, in first-seen order
    pub fn all_network_reaches(&self) -> Vec<(UserId, usize)> {
        subtree_sizes(&build_view(self))
            .into_iter()
            .enumerate()
            .map(|(idx, reach)| (self.user_at(idx).clone(), reach))
            .collect()
    }

    /// Longest referral chain, in edges. 0 for an empty graph.
    pub fn get_max_depth(&self) -> usize {
        max_depth(&build_view(self))
    }
}
