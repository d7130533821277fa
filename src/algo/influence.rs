//! Influence ranking and aggregate network statistics
//!
//! Three views of influence:
//! - direct referral count and total reach, ranked
//! - unique-reach influencers from greedy maximum coverage (an approximation
//!   of an NP-hard problem, not an optimal selection)
//! - flow centrality, the number of ancestor/descendant pairs a user brokers

use super::build_view;
use crate::graph::{ReferralGraph, UserId};
use referral_graph_algorithms::{
    flow_centrality, greedy_unique_reach, subtree_sizes, top_k, GraphView,
};
use serde::{Deserialize, Serialize};

/// A user with a count: total reach or direct referrals, depending on the ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedUser {
    pub user_id: UserId,
    pub count: usize,
}

/// A greedy coverage pick and the users it added
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfluencerReach {
    pub user_id: UserId,
    pub unique_reach: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowInfluencer {
    pub user_id: UserId,
    pub centrality_score: u64,
}

/// Snapshot of the whole network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    pub total_users: usize,
    pub total_referrals: usize,
    pub avg_referrals_per_user: f64,
    /// Ranked by direct referral count
    pub top_referrers: Vec<RankedUser>,
    pub unique_influencers: Vec<InfluencerReach>,
    pub flow_influencers: Vec<FlowInfluencer>,
}

impl NetworkStats {
    /// Average referrals per user scaled by 10
    pub fn network_density(&self) -> f64 {
        self.avg_referrals_per_user * 10.0
    }

    /// Share of all ordered user pairs that are direct referrals
    pub fn connectivity(&self) -> f64 {
        let n = self.total_users as f64;
        if self.total_users < 2 {
            return 0.0;
        }
        self.total_referrals as f64 / (n * (n - 1.0))
    }
}

impl ReferralGraph {
    /// Users ranked by total reach, highest first, ties in first-seen order.
    /// Users with no reach are left out.
    pub fn get_top_referrers_by_reach(&self, k: usize) -> Vec<RankedUser> {
        let reaches = subtree_sizes(&build_view(self));
        self.ranked(top_k(&reaches, k))
    }

    /// Users ranked by direct referral count, highest first
    pub fn get_top_referrers_by_direct_count(&self, k: usize) -> Vec<RankedUser> {
        let counts: Vec<usize> = self.child_lists().iter().map(Vec::len).collect();
        self.ranked(top_k(&counts, k))
    }

    /// Greedy unique-reach picks; `None` runs until no pick adds coverage
    pub fn get_unique_influencers(&self, limit: Option<usize>) -> Vec<InfluencerReach> {
        self.unique_influencers(&build_view(self), limit)
    }

    /// Users ranked by flow centrality, zero scores left out
    pub fn get_flow_influencers(&self, k: usize) -> Vec<FlowInfluencer> {
        self.flow_influencers(&build_view(self), k)
    }

    pub fn get_network_stats(&self) -> NetworkStats {
        let limits = &self.config().stats;
        let view = build_view(self);

        let total_users = self.user_count();
        let total_referrals = self.referral_count();

        NetworkStats {
            total_users,
            total_referrals,
            avg_referrals_per_user: total_referrals as f64 / total_users.max(1) as f64,
            top_referrers: self.get_top_referrers_by_direct_count(limits.top_referrers_limit),
            unique_influencers: self.unique_influencers(&view, Some(limits.influencer_limit)),
            flow_influencers: self.flow_influencers(&view, limits.influencer_limit),
        }
    }

    fn unique_influencers(&self, view: &GraphView, limit: Option<usize>) -> Vec<InfluencerReach> {
        greedy_unique_reach(view, limit)
            .into_iter()
            .map(|pick| InfluencerReach {
                user_id: self.user_at(pick.node).clone(),
                unique_reach: pick.gain,
            })
            .collect()
    }

    fn flow_influencers(&self, view: &GraphView, k: usize) -> Vec<FlowInfluencer> {
        top_k(&flow_centrality(view), k)
            .into_iter()
            .map(|(idx, score)| FlowInfluencer {
                user_id: self.user_at(idx).clone(),
                centrality_score: score,
            })
            .collect()
    }

    fn ranked(&self, ranking: Vec<(usize, usize)>) -> Vec<RankedUser> {
        ranking
            .into_iter()
            .map(|(idx, count)| RankedUser {
                user_id: self.user_at(idx).clone(),
                count,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // root -> a -> {c, d}, root -> b, solo -> e
    fn sample() -> ReferralGraph {
        let mut graph = ReferralGraph::new();
        graph.add_referral("root", "a").unwrap();
        graph.add_referral("root", "b").unwrap();
        graph.add_referral("a", "c").unwrap();
        graph.add_referral("a", "d").unwrap();
        graph.add_referral("solo", "e").unwrap();
        graph
    }

    fn ids<T>(items: &[T], id: impl Fn(&T) -> &UserId) -> Vec<&str> {
        items.iter().map(|item| id(item).as_str()).collect()
    }

    #[test]
    fn test_top_referrers_by_reach() {
        let graph = sample();
        let top = graph.get_top_referrers_by_reach(10);
        assert_eq!(ids(&top, |r| &r.user_id), vec!["root", "a", "solo"]);
        assert_eq!(top.iter().map(|r| r.count).collect::<Vec<_>>(), vec![4, 2, 1]);

        assert_eq!(graph.get_top_referrers_by_reach(1).len(), 1);
        assert!(graph.get_top_referrers_by_reach(0).is_empty());
    }

    #[test]
    fn test_top_referrers_by_direct_count_ties() {
        let graph = sample();
        let top = graph.get_top_referrers_by_direct_count(10);
        // root and a both made two referrals; root was seen first
        assert_eq!(ids(&top, |r| &r.user_id), vec!["root", "a", "solo"]);
        assert_eq!(top.iter().map(|r| r.count).collect::<Vec<_>>(), vec![2, 2, 1]);
    }

    #[test]
    fn test_unique_influencers() {
        let graph = sample();
        let picks = graph.get_unique_influencers(None);
        assert_eq!(
            picks,
            vec![
                InfluencerReach {
                    user_id: UserId::new("root"),
                    unique_reach: 4
                },
                InfluencerReach {
                    user_id: UserId::new("solo"),
                    unique_reach: 1
                },
            ]
        );
    }

    #[test]
    fn test_flow_influencers() {
        let graph = sample();
        let flow = graph.get_flow_influencers(10);
        // Only "a" sits between an ancestor and descendants: 1 * 2
        assert_eq!(
            flow,
            vec![FlowInfluencer {
                user_id: UserId::new("a"),
                centrality_score: 2
            }]
        );
    }

    #[test]
    fn test_network_stats() {
        let graph = sample();
        let stats = graph.get_network_stats();

        assert_eq!(stats.total_users, 7);
        assert_eq!(stats.total_referrals, 5);
        assert!((stats.avg_referrals_per_user - 5.0 / 7.0).abs() < 1e-12);
        assert_eq!(stats.top_referrers.len(), 3);
        assert_eq!(stats.unique_influencers.len(), 2);
        assert_eq!(stats.flow_influencers.len(), 1);
        assert!((stats.network_density() - 50.0 / 7.0).abs() < 1e-12);
        assert!((stats.connectivity() - 5.0 / 42.0).abs() < 1e-12);
    }

    #[test]
    fn test_network_stats_empty_graph() {
        let stats = ReferralGraph::new().get_network_stats();
        assert_eq!(stats.total_users, 0);
        assert_eq!(stats.avg_referrals_per_user, 0.0);
        assert!(stats.top_referrers.is_empty());
        assert!(stats.unique_influencers.is_empty());
        assert!(stats.flow_influencers.is_empty());
        assert_eq!(stats.connectivity(), 0.0);
    }

    #[test]
    fn test_stats_respect_configured_limits() {
        let mut config = crate::config::EngineConfig::default();
        config.stats.top_referrers_limit = 1;
        config.stats.influencer_limit = 1;
        let mut graph = ReferralGraph::with_config(config).unwrap();
        for (referrer, candidate) in [("a", "b"), ("c", "d"), ("e", "f"), ("b", "g")] {
            graph.add_referral(referrer, candidate).unwrap();
        }

        let stats = graph.get_network_stats();
        assert_eq!(stats.top_referrers.len(), 1);
        assert_eq!(stats.unique_influencers.len(), 1);
        assert_eq!(stats.unique_influencers[0].user_id, UserId::new("a"));
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let json = serde_json::to_value(sample().get_network_stats()).unwrap();
        assert_eq!(json["totalUsers"], 7);
        assert_eq!(json["topReferrers"][0]["userId"], "root");
        assert_eq!(json["flowInfluencers"][0]["centralityScore"], 2);
    }
}
