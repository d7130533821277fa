//! In-memory referral graph storage and validation
//!
//! The graph is kept as a forest at all times:
//! - no user refers themselves
//! - every candidate has at most one referrer, assigned once
//! - no chain of referrals loops back on itself
//!
//! Users get a dense index in first-seen order. Children are stored per
//! referrer in insertion order, parents per candidate.

use super::types::{ReferralEdge, UserId};
use crate::config::{ConfigResult, EngineConfig};
use indexmap::IndexSet;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::debug;

/// Structural violations rejected by [`ReferralGraph::add_referral`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("User {0} cannot refer themselves")]
    SelfReferral(UserId),

    #[error("User {candidate} was already referred by {existing}")]
    DuplicateReferrer { candidate: UserId, existing: UserId },

    #[error("Referral {referrer} -> {candidate} would create a cycle")]
    Cycle { referrer: UserId, candidate: UserId },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Graph shared between threads: one writer at a time, concurrent readers
pub type SharedReferralGraph = Arc<RwLock<ReferralGraph>>;

/// Outcome of a catch-and-skip bulk insert
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BulkInsertReport {
    pub inserted: usize,
    pub skipped: Vec<(ReferralEdge, GraphError)>,
}

/// In-memory referral forest
///
/// Uses dense indices for traversal performance:
/// - users: first-seen ordered set, position = index
/// - children: index -> Vec<index> (referrals made, insertion order)
/// - parents: index -> Option<index> (who referred this user)
#[derive(Debug, Clone)]
pub struct ReferralGraph {
    users: IndexSet<UserId>,

    children: Vec<Vec<usize>>,

    parents: Vec<Option<usize>>,

    /// Number of edges
    referral_count: usize,

    config: EngineConfig,
}

impl ReferralGraph {
    /// Create a new empty graph with default configuration
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Empty graph with a custom configuration, rejected if it fails
    /// [`EngineConfig::validate`]
    pub fn with_config(config: EngineConfig) -> ConfigResult<Self> {
        Self::with_capacity_and_config(0, config)
    }

    /// Pre-size storage for `users` users
    pub fn with_capacity(users: usize) -> Self {
        Self::from_parts(users, EngineConfig::default())
    }

    pub fn with_capacity_and_config(users: usize, config: EngineConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(users, config))
    }

    fn from_parts(users: usize, config: EngineConfig) -> Self {
        ReferralGraph {
            users: IndexSet::with_capacity(users),
            children: Vec::with_capacity(users),
            parents: Vec::with_capacity(users),
            referral_count: 0,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Wrap the graph for sharing across threads
    pub fn into_shared(self) -> SharedReferralGraph {
        Arc::new(RwLock::new(self))
    }

    /// Record that `referrer` introduced `candidate`.
    ///
    /// All checks run before anything is written, so a rejected call leaves
    /// the graph untouched (unknown ids are not registered either).
    pub fn add_referral(
        &mut self,
        referrer: impl AsRef<str>,
        candidate: impl AsRef<str>,
    ) -> GraphResult<()> {
        let referrer = referrer.as_ref();
        let candidate = candidate.as_ref();

        if referrer == candidate {
            debug!("Rejected self-referral by {}", referrer);
            return Err(GraphError::SelfReferral(UserId::new(referrer)));
        }

        if let Some(candidate_idx) = self.users.get_index_of(candidate) {
            if let Some(existing) = self.parents[candidate_idx] {
                debug!("Rejected {} -> {}: already referred", referrer, candidate);
                return Err(GraphError::DuplicateReferrer {
                    candidate: UserId::new(candidate),
                    existing: self.users[existing].clone(),
                });
            }

            if let Some(referrer_idx) = self.users.get_index_of(referrer) {
                if self.reaches(candidate_idx, referrer_idx) {
                    debug!("Rejected {} -> {}: would close a cycle", referrer, candidate);
                    return Err(GraphError::Cycle {
                        referrer: UserId::new(referrer),
                        candidate: UserId::new(candidate),
                    });
                }
            }
        }

        let referrer_idx = self.intern(referrer);
        let candidate_idx = self.intern(candidate);

        // The candidate is a root, so the referrer cannot already reach it either
        debug_assert!(!self.is_ancestor(referrer_idx, candidate_idx));

        self.children[referrer_idx].push(candidate_idx);
        self.parents[candidate_idx] = Some(referrer_idx);
        self.referral_count += 1;

        debug!("Recorded referral {} -> {}", referrer, candidate);
        Ok(())
    }

    /// Insert many referrals, skipping (and reporting) the rejected ones
    pub fn extend_referrals<I>(&mut self, edges: I) -> BulkInsertReport
    where
        I: IntoIterator<Item = ReferralEdge>,
    {
        let mut report = BulkInsertReport::default();
        for edge in edges {
            match self.add_referral(&edge.referrer, &edge.candidate) {
                Ok(()) => report.inserted += 1,
                Err(e) => report.skipped.push((edge, e)),
            }
        }
        debug!(
            "Bulk insert: {} inserted, {} skipped",
            report.inserted,
            report.skipped.len()
        );
        report
    }

    /// Immediate referrals made by `user`, oldest first. Empty for unknown ids.
    pub fn get_direct_referrals(&self, user: impl AsRef<str>) -> Vec<UserId> {
        self.users
            .get_index_of(user.as_ref())
            .map(|idx| {
                self.children[idx]
                    .iter()
                    .map(|&child| self.users[child].clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn direct_referral_count(&self, user: impl AsRef<str>) -> usize {
        self.users
            .get_index_of(user.as_ref())
            .map_or(0, |idx| self.children[idx].len())
    }

    /// Who referred `user`, if anyone
    pub fn get_referrer(&self, user: impl AsRef<str>) -> Option<&UserId> {
        let idx = self.users.get_index_of(user.as_ref())?;
        self.parents[idx].map(|parent| &self.users[parent])
    }

    /// Whether `to` is a strict descendant of `from`
    pub fn can_reach(&self, from: impl AsRef<str>, to: impl AsRef<str>) -> bool {
        match (
            self.users.get_index_of(from.as_ref()),
            self.users.get_index_of(to.as_ref()),
        ) {
            (Some(from_idx), Some(to_idx)) => self.reaches(from_idx, to_idx),
            _ => false,
        }
    }

    /// All known users in first-seen order.
    ///
    /// The iterator is lazy and `Clone`; call again to restart.
    pub fn users(&self) -> impl Iterator<Item = &UserId> + Clone + '_ {
        self.users.iter()
    }

    /// Users nobody referred
    pub fn roots(&self) -> impl Iterator<Item = &UserId> + '_ {
        self.parents
            .iter()
            .enumerate()
            .filter(|(_, parent)| parent.is_none())
            .map(move |(idx, _)| &self.users[idx])
    }

    pub fn contains_user(&self, user: impl AsRef<str>) -> bool {
        self.users.contains(user.as_ref())
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of referral edges
    pub fn referral_count(&self) -> usize {
        self.referral_count
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Remove every user and referral; configuration is kept
    pub fn clear(&mut self) {
        self.users.clear();
        self.children.clear();
        self.parents.clear();
        self.referral_count = 0;
    }

    pub(crate) fn index_of(&self, user: &str) -> Option<usize> {
        self.users.get_index_of(user)
    }

    pub(crate) fn user_at(&self, idx: usize) -> &UserId {
        &self.users[idx]
    }

    pub(crate) fn child_lists(&self) -> &[Vec<usize>] {
        &self.children
    }

    fn intern(&mut self, user: &str) -> usize {
        if let Some(idx) = self.users.get_index_of(user) {
            return idx;
        }
        let (idx, _) = self.users.insert_full(UserId::new(user));
        self.children.push(Vec::new());
        self.parents.push(None);
        idx
    }

    /// Forward DFS over children: is `to` below `from`?
    fn reaches(&self, from: usize, to: usize) -> bool {
        let mut stack: Vec<usize> = self.children[from].clone();
        while let Some(idx) = stack.pop() {
            if idx == to {
                return true;
            }
            stack.extend_from_slice(&self.children[idx]);
        }
        false
    }

    /// Walk up from `node`: is `ancestor` on its parent chain?
    fn is_ancestor(&self, ancestor: usize, node: usize) -> bool {
        let mut current = self.parents[node];
        while let Some(idx) = current {
            if idx == ancestor {
                return true;
            }
            current = self.parents[idx];
        }
        false
    }
}

impl Default for ReferralGraph {
    fn default() -> Self {
        Self::new()
    }
}
