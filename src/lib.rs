//! Referral Graph Engine
//!
//! Maintains a "who referred whom" forest, answers reach and influence
//! queries over it, projects network growth, and searches for the smallest
//! referral bonus that meets a hiring target.
//!
//! # Components
//!
//! - Graph store & validator: [`graph::ReferralGraph`] keeps the forest
//!   invariants (no self-referral, one referrer per candidate, no cycles)
//! - Reach analyzer: downstream counts and forest depth
//! - Influence ranker: top referrers, greedy unique-reach influencers, flow centrality
//! - Growth simulator: deterministic expected-value projection
//! - Bonus optimizer: binary search over an adoption curve
//!
//! All queries borrow the graph immutably and never fail: unknown users get
//! empty or zero answers. Only [`ReferralGraph::add_referral`] can fail.
//!
//! ## Example Usage
//!
//! ```rust
//! use referral_graph::{GraphError, LinearAdoptionCurve, ReferralGraph};
//!
//! let mut graph = ReferralGraph::new();
//! graph.add_referral("u1", "u2").unwrap();
//! graph.add_referral("u1", "u3").unwrap();
//! graph.add_referral("u2", "u4").unwrap();
//!
//! assert_eq!(graph.calculate_network_reach("u1"), 3);
//! assert_eq!(graph.get_direct_referrals("u1"), ["u2", "u3"]);
//! assert_eq!(graph.get_max_depth(), 2);
//!
//! // u4 already sits below u1
//! assert!(matches!(graph.add_referral("u4", "u1"), Err(GraphError::Cycle { .. })));
//!
//! let stats = graph.get_network_stats();
//! assert_eq!(stats.total_referrals, 3);
//!
//! let projection = graph.simulate(0.3, 30);
//! assert_eq!(projection.len(), 30);
//!
//! let outcome = graph.min_bonus_for_target(30, 500, &LinearAdoptionCurve::default());
//! assert!(outcome.is_achievable());
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod graph;
pub mod simulation;

// Re-export main types for convenience
pub use graph::{
    BulkInsertReport, GraphError, GraphResult, ReferralEdge, ReferralGraph, SharedReferralGraph,
    UserId,
};

pub use algo::{FlowInfluencer, InfluencerReach, NetworkStats, RankedUser};

pub use config::{ConfigError, ConfigResult, EngineConfig, StatsConfig};

pub use referral_optimization::{
    AdoptionCurve, BonusConfig, BonusOutcome, BonusPlan, BonusTarget, GrowthConfig, GrowthSeed,
    LinearAdoptionCurve,
};
